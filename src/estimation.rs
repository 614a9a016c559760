use log::{debug, info, warn};

use crate::{
    Dataset, Fit, LinearParams, MleErr, Result,
    likelihood::{GaussianLikelihood, LogLikelihood},
    optimization::{Lbfgs, Minimizer},
    scaling::{Standardization, Standardized},
};

/// Relative gradient norm under which a reported optimum is accepted.
const STATIONARITY_TOLERANCE: f64 = 1e-5;

/// Maximum likelihood estimator of the line parameters.
///
/// Stateless: every call minimizes `-ℓ` from scratch with the configured [`Minimizer`] and checks
/// the result before handing it out.
#[derive(Debug, Default, Clone)]
pub struct MleEstimator<M = Lbfgs, L = GaussianLikelihood> {
    minimizer: M,
    likelihood: L,
}

impl MleEstimator {
    /// Returns an estimator using L-BFGS on the Gaussian unit-variance likelihood.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: Minimizer> MleEstimator<M> {
    /// Returns an estimator using `minimizer` on the Gaussian unit-variance likelihood.
    pub fn with_minimizer(minimizer: M) -> Self {
        Self::with(minimizer, GaussianLikelihood)
    }
}

impl<M: Minimizer, L: LogLikelihood> MleEstimator<M, L> {
    /// Creates a new `MleEstimator`.
    ///
    /// # Arguments
    /// * `minimizer` - The algorithm minimizing the negative log-likelihood.
    /// * `likelihood` - The error model.
    pub fn with(minimizer: M, likelihood: L) -> Self {
        Self {
            minimizer,
            likelihood,
        }
    }

    /// Estimates `(a, b)` starting from `(0, 0)`.
    pub fn estimate(&self, data: &Dataset) -> Result<LinearParams> {
        self.fit(data).map(|fit| fit.params)
    }

    /// Estimates `(a, b)` starting from `init`.
    pub fn estimate_from(&self, data: &Dataset, init: LinearParams) -> Result<LinearParams> {
        self.fit_from(data, init).map(|fit| fit.params)
    }

    /// Same as [`estimate`](Self::estimate) but keeps the log-likelihood and iteration count.
    pub fn fit(&self, data: &Dataset) -> Result<Fit> {
        self.fit_from(data, LinearParams::default())
    }

    /// Maximizes the log-likelihood of `data` starting from `init`.
    ///
    /// The minimizer works on a line over standardized `x` (see [`Standardization`]) and the result
    /// is mapped back to the original coordinates.
    ///
    /// # Returns
    /// `MleErr::EstimationFailure` if the minimizer did not converge, stopped at a non-finite point
    /// or reported convergence away from a stationary point.
    pub fn fit_from(&self, data: &Dataset, init: LinearParams) -> Result<Fit> {
        if !data.has_distinct_x() {
            warn!(
                "all {} observations share the same x, the slope is not identifiable",
                data.len()
            );
        }

        let map = Standardization::of(data);
        let standardized = Standardized::new(&self.likelihood, map);

        let minimum = self
            .minimizer
            .minimize(&standardized, data, map.to_standard(init))
            .map_err(|e| match e {
                MleErr::EstimationFailure {
                    last,
                    objective,
                    message,
                } => MleErr::EstimationFailure {
                    last: map.to_original(last),
                    objective,
                    message,
                },
                other => other,
            })?;

        let params = map.to_original(minimum.params);
        let log_likelihood = self.likelihood.value(&params, data);
        let failure = |message| MleErr::EstimationFailure {
            last: params,
            objective: log_likelihood,
            message,
        };

        if !minimum.converged || !params.is_finite() || !log_likelihood.is_finite() {
            return Err(failure(minimum.status));
        }

        let [da, db] = standardized.gradient(&minimum.params, data);
        let norm = da.hypot(db);
        let bound = stationarity_bound(data, &params);
        if norm.is_nan() || norm > bound {
            return Err(failure(format!(
                "{}, but the gradient norm {norm:e} exceeds {bound:e}",
                minimum.status
            )));
        }

        debug!(
            "cost {} after {} iterations, gradient norm {norm:e}",
            minimum.cost, minimum.iterations
        );
        info!(
            "estimated {params} from {} observations, log-likelihood {log_likelihood}",
            data.len()
        );

        Ok(Fit {
            params,
            log_likelihood,
            iterations: minimum.iterations,
        })
    }
}

/// Largest standardized gradient norm accepted at a reported optimum.
///
/// Each gradient component sums `N` terms of the size of a residual, so the bound grows with `N` and
/// with the root mean square residual.
fn stationarity_bound(data: &Dataset, params: &LinearParams) -> f64 {
    let n = data.len() as f64;
    let rms = (data.residuals(params).mapv(|e| e.powi(2)).sum() / n).sqrt();

    STATIONARITY_TOLERANCE * n * (1.0 + rms)
}
