use argmin::{
    core::Executor,
    solver::{linesearch::MoreThuenteLineSearch, quasinewton::LBFGS},
};
use log::debug;

use super::{
    Minimizer, Minimum,
    adapter::{NegLogLikelihood, Theta, aborted, summarize},
};
use crate::{Dataset, LinearParams, Result, likelihood::LogLikelihood};

type MoreThuente = MoreThuenteLineSearch<Theta, Theta, f64>;

/// Limited-memory BFGS with a More-Thuente line search, backed by argmin.
#[derive(Debug, Clone, Copy)]
pub struct Lbfgs {
    memory: usize,
    max_iters: u64,
    tol_grad: f64,
}

impl Default for Lbfgs {
    fn default() -> Self {
        Self {
            memory: 7,
            max_iters: 200,
            tol_grad: 1e-8,
        }
    }
}

impl Lbfgs {
    /// Returns a new `Lbfgs` with the default settings.
    pub fn new() -> Self {
        Self::default()
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
}

impl Minimizer for Lbfgs {
    fn minimize<L>(&self, likelihood: &L, data: &Dataset, init: LinearParams) -> Result<Minimum>
    where
        L: LogLikelihood,
    {
        let problem = NegLogLikelihood::new(likelihood, data);

        let solver = LBFGS::new(MoreThuente::new(), self.memory)
            .with_tolerance_grad(self.tol_grad)
            .map_err(|e| aborted(likelihood, data, init, e))?;

        let result = Executor::new(problem, solver)
            .configure(|state| state.param(init.to_vec()).max_iters(self.max_iters))
            .run()
            .map_err(|e| aborted(likelihood, data, init, e))?;

        let minimum = summarize(result.state(), init);
        debug!(
            "l-bfgs stopped after {} iterations at {} ({})",
            minimum.iterations, minimum.params, minimum.status
        );

        Ok(minimum)
    }
}
