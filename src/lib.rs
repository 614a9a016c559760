pub mod config;
pub mod dataset;
pub mod error;
pub mod estimation;
pub mod fit;
pub mod generation;
pub mod likelihood;
pub mod optimization;
pub mod params;
pub mod report;
pub mod scaling;

pub use dataset::Dataset;
pub use error::{MleErr, Result};
pub use estimation::MleEstimator;
pub use fit::{Fit, Histogram};
pub use generation::{GeneratorConfig, SampleGenerator};
pub use likelihood::{GaussianLikelihood, LogLikelihood, log_likelihood};
pub use params::LinearParams;
