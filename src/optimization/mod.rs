mod adapter;
mod gradient_descent;
mod lbfgs;
mod minimizer;
mod nelder_mead;

pub use gradient_descent::GradientDescent;
pub use lbfgs::Lbfgs;
pub use minimizer::{Minimizer, Minimum};
pub use nelder_mead::NelderMead;
