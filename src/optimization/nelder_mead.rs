use argmin::{core::Executor, solver::neldermead::NelderMead as ArgminNelderMead};
use log::debug;

use super::{
    Minimizer, Minimum,
    adapter::{NegLogLikelihood, Theta, aborted, summarize},
};
use crate::{Dataset, LinearParams, Result, likelihood::LogLikelihood};

/// Derivative-free downhill simplex, backed by argmin.
///
/// The initial simplex is the initial guess plus one vertex `step` away along each axis.
#[derive(Debug, Clone, Copy)]
pub struct NelderMead {
    step: f64,
    max_iters: u64,
    sd_tolerance: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            step: 1.0,
            max_iters: 2000,
            sd_tolerance: 1e-10,
        }
    }
}

impl NelderMead {
    /// Returns a new `NelderMead` with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Sets the standard deviation of the simplex costs below which the run counts as converged.
    pub fn with_tolerance(mut self, sd_tolerance: f64) -> Self {
        self.sd_tolerance = sd_tolerance;
        self
    }

    fn simplex(&self, init: LinearParams) -> Vec<Theta> {
        vec![
            init.to_vec(),
            vec![init.a + self.step, init.b],
            vec![init.a, init.b + self.step],
        ]
    }
}

impl Minimizer for NelderMead {
    fn minimize<L>(&self, likelihood: &L, data: &Dataset, init: LinearParams) -> Result<Minimum>
    where
        L: LogLikelihood,
    {
        let problem = NegLogLikelihood::new(likelihood, data);

        let solver = ArgminNelderMead::new(self.simplex(init))
            .with_sd_tolerance(self.sd_tolerance)
            .map_err(|e| aborted(likelihood, data, init, e))?;

        let result = Executor::new(problem, solver)
            .configure(|state| state.max_iters(self.max_iters))
            .run()
            .map_err(|e| aborted(likelihood, data, init, e))?;

        let minimum = summarize(result.state(), init);
        debug!(
            "nelder-mead stopped after {} iterations at {} ({})",
            minimum.iterations, minimum.params, minimum.status
        );

        Ok(minimum)
    }
}
