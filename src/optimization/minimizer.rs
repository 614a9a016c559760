use crate::{Dataset, LinearParams, Result, likelihood::LogLikelihood};

/// The outcome of a minimization run, converged or not.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// The best iterate found.
    pub params: LinearParams,
    /// The negative log-likelihood at `params`.
    pub cost: f64,
    pub iterations: u64,
    /// Whether the algorithm's own stopping criterion was met before its budget ran out.
    pub converged: bool,
    /// Human-readable termination status.
    pub status: String,
}

/// An unconstrained minimizer over the two line parameters.
///
/// Implementations minimize the cost `c(a, b) = -ℓ(a, b)` and report where they stopped; judging
/// whether that point is usable is up to the caller.
pub trait Minimizer {
    /// Minimizes the negative of `likelihood` over `data`, starting at `init`.
    ///
    /// # Arguments
    /// * `likelihood` - The objective to maximize.
    /// * `data` - The observations the objective is evaluated on.
    /// * `init` - The initial guess.
    ///
    /// # Returns
    /// The final state of the run, or `MleErr::EstimationFailure` if the algorithm aborted before
    /// producing one.
    fn minimize<L>(&self, likelihood: &L, data: &Dataset, init: LinearParams) -> Result<Minimum>
    where
        L: LogLikelihood;
}
