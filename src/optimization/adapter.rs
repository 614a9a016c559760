use argmin::core::{
    CostFunction, Error as ArgminError, Gradient, State, TerminationReason, TerminationStatus,
};

use super::Minimum;
use crate::{Dataset, LinearParams, MleErr, likelihood::LogLikelihood};

/// Parameter vector handed to argmin, always `[a, b]`.
pub(super) type Theta = Vec<f64>;

/// Exposes `-ℓ` to argmin solvers.
pub(super) struct NegLogLikelihood<'a, L> {
    likelihood: &'a L,
    data: &'a Dataset,
}

impl<'a, L: LogLikelihood> NegLogLikelihood<'a, L> {
    pub(super) fn new(likelihood: &'a L, data: &'a Dataset) -> Self {
        Self { likelihood, data }
    }
}

impl<L: LogLikelihood> CostFunction for NegLogLikelihood<'_, L> {
    type Param = Theta;
    type Output = f64;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, ArgminError> {
        let params = LinearParams::from_slice(theta);
        Ok(-self.likelihood.value(&params, self.data))
    }
}

impl<L: LogLikelihood> Gradient for NegLogLikelihood<'_, L> {
    type Param = Theta;
    type Gradient = Theta;

    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, ArgminError> {
        let params = LinearParams::from_slice(theta);
        let [da, db] = self.likelihood.gradient(&params, self.data);
        Ok(vec![-da, -db])
    }
}

/// Reads the final solver state into a `Minimum`.
pub(super) fn summarize<I>(state: &I, init: LinearParams) -> Minimum
where
    I: State<Param = Theta, Float = f64>,
{
    let params = state
        .get_best_param()
        .or_else(|| state.get_param())
        .map(|theta| LinearParams::from_slice(theta))
        .unwrap_or(init);

    let converged = matches!(
        state.get_termination_status(),
        TerminationStatus::Terminated(
            TerminationReason::SolverConverged | TerminationReason::TargetCostReached
        )
    );

    let status = match state.get_termination_status() {
        TerminationStatus::NotTerminated => "not terminated".to_string(),
        TerminationStatus::Terminated(reason) => format!("{reason:?}"),
    };

    Minimum {
        params,
        cost: state.get_best_cost(),
        iterations: state.get_iter(),
        converged,
        status,
    }
}

/// Turns an error raised inside an argmin run into an estimation failure.
///
/// argmin drops the solver state on error, so the failure is reported at `init`.
pub(super) fn aborted<L: LogLikelihood>(
    likelihood: &L,
    data: &Dataset,
    init: LinearParams,
    err: ArgminError,
) -> MleErr {
    MleErr::EstimationFailure {
        last: init,
        objective: likelihood.value(&init, data),
        message: format!("{err}; last iterate unavailable, reporting the initial guess"),
    }
}
