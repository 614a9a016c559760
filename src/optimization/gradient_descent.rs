use log::debug;

use super::{Minimizer, Minimum};
use crate::{Dataset, LinearParams, Result, likelihood::LogLikelihood};

/// Gradient descent optimization algorithm with a fixed step length.
///
/// Converges once the gradient norm drops below `tol_grad`, gives up after `max_iters` steps.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f64,
    max_iters: u64,
    tol_grad: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            max_iters: 10_000,
            tol_grad: 1e-6,
        }
    }

    pub fn with_max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Sets the gradient norm below which the run counts as converged.
    pub fn with_tolerance(mut self, tol_grad: f64) -> Self {
        self.tol_grad = tol_grad;
        self
    }

    /// Makes a step in the opposite direction of `grad`, with a length of `learning_rate`.
    fn update_params(&self, params: &mut [f64], grad: &[f64]) {
        let lr = self.learning_rate;

        for (w, g) in params.iter_mut().zip(grad) {
            *w -= lr * g;
        }
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self::new(1e-4)
    }
}

impl Minimizer for GradientDescent {
    fn minimize<L>(&self, likelihood: &L, data: &Dataset, init: LinearParams) -> Result<Minimum>
    where
        L: LogLikelihood,
    {
        let mut params = [init.a, init.b];
        let mut iterations = 0;

        let (converged, status) = loop {
            let current = LinearParams::new(params[0], params[1]);
            let [da, db] = likelihood.gradient(&current, data);
            let grad = [-da, -db];
            let norm = grad[0].hypot(grad[1]);

            if !norm.is_finite() {
                break (false, format!("gradient diverged at iteration {iterations}"));
            }
            if norm < self.tol_grad {
                break (true, "SolverConverged".to_string());
            }
            if iterations == self.max_iters {
                break (false, "MaxItersReached".to_string());
            }

            self.update_params(&mut params, &grad);
            iterations += 1;
        };

        let params = LinearParams::new(params[0], params[1]);
        debug!("gradient descent stopped after {iterations} iterations at {params} ({status})");

        Ok(Minimum {
            params,
            cost: -likelihood.value(&params, data),
            iterations,
            converged,
            status,
        })
    }
}
