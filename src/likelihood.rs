use std::f64::consts::PI;

use ndarray::Zip;

use crate::{Dataset, LinearParams};

/// A log-likelihood `ℓ(a, b)` of a line given a dataset.
///
/// The dataset is always passed explicitly so implementations stay pure.
pub trait LogLikelihood {
    /// Returns `ℓ(params | data)`.
    fn value(&self, params: &LinearParams, data: &Dataset) -> f64;

    /// Returns `[∂ℓ/∂a, ∂ℓ/∂b]` at `params`.
    fn gradient(&self, params: &LinearParams, data: &Dataset) -> [f64; 2];
}

/// Gaussian errors with unit variance: `ℓ = -½ Σ e_i² - ½ N ln(2π)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GaussianLikelihood;

impl GaussianLikelihood {
    /// Returns a new `GaussianLikelihood`.
    pub fn new() -> Self {
        Self
    }
}

impl LogLikelihood for GaussianLikelihood {
    fn value(&self, params: &LinearParams, data: &Dataset) -> f64 {
        let sse = data.residuals(params).mapv(|e| e.powi(2)).sum();
        -0.5 * sse - 0.5 * data.len() as f64 * (2.0 * PI).ln()
    }

    fn gradient(&self, params: &LinearParams, data: &Dataset) -> [f64; 2] {
        let mut grad = [0.0; 2];

        Zip::from(data.x()).and(data.y()).for_each(|&x, &y| {
            let e = y - params.predict(x);
            grad[0] += e * x;
            grad[1] += e;
        });

        grad
    }
}

/// Gaussian unit-variance log-likelihood of `params` given `data`.
pub fn log_likelihood(params: &LinearParams, data: &Dataset) -> f64 {
    GaussianLikelihood.value(params, data)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    fn data() -> Dataset {
        Dataset::new(array![-1., 0., 1., 2.], array![-0.5, 1.5, 2.5, 4.0]).unwrap()
    }

    #[test]
    fn perfect_fit_leaves_only_the_constant() {
        let data = Dataset::new(array![0., 1., 2.], array![1., 3., 5.]).unwrap();
        let ll = log_likelihood(&LinearParams::new(2.0, 1.0), &data);

        assert_relative_eq!(ll, -1.5 * (2.0 * PI).ln(), epsilon = 1e-12);
    }

    #[test]
    fn value_matches_hand_computation() {
        // residuals at (1, 1): -0.5, 0.5, 0.5, 1.0
        let ll = log_likelihood(&LinearParams::new(1.0, 1.0), &data());
        let expected = -0.5 * 1.75 - 2.0 * (2.0 * PI).ln();

        assert_relative_eq!(ll, expected, epsilon = 1e-12);
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let data = data();
        let params = LinearParams::new(0.3, -0.7);
        let grad = GaussianLikelihood.gradient(&params, &data);

        let h = 1e-6;
        let da = (log_likelihood(&LinearParams::new(params.a + h, params.b), &data)
            - log_likelihood(&LinearParams::new(params.a - h, params.b), &data))
            / (2.0 * h);
        let db = (log_likelihood(&LinearParams::new(params.a, params.b + h), &data)
            - log_likelihood(&LinearParams::new(params.a, params.b - h), &data))
            / (2.0 * h);

        assert_relative_eq!(grad[0], da, epsilon = 1e-5);
        assert_relative_eq!(grad[1], db, epsilon = 1e-5);
    }
}
