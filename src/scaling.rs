use crate::{Dataset, LinearParams, likelihood::LogLikelihood};

/// Affine change of the line coordinates that standardizes `x`.
///
/// With `x' = (x - center) / scale` the line `a x + b` equals `a' x' + b'` for `a' = a * scale` and
/// `b' = b + a * center`. Minimizing over `(a', b')` keeps the problem well conditioned however far
/// from zero or however narrow the observed `x` are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardization {
    center: f64,
    scale: f64,
}

impl Standardization {
    /// Centers on the mean of `x` and scales by its population standard deviation. A constant `x`
    /// keeps a unit scale.
    pub fn of(data: &Dataset) -> Self {
        let x = data.x();
        let n = x.len() as f64;
        let center = x.sum() / n;
        let scale = (x.mapv(|x| (x - center).powi(2)).sum() / n).sqrt();

        Self {
            center,
            scale: if scale > 0.0 && scale.is_finite() { scale } else { 1.0 },
        }
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn to_standard(&self, params: LinearParams) -> LinearParams {
        LinearParams::new(params.a * self.scale, params.b + params.a * self.center)
    }

    pub fn to_original(&self, params: LinearParams) -> LinearParams {
        let a = params.a / self.scale;
        LinearParams::new(a, params.b - a * self.center)
    }

    /// Chain rule: `[∂ℓ/∂a, ∂ℓ/∂b]` to `[∂ℓ/∂a', ∂ℓ/∂b']`.
    pub fn gradient_to_standard(&self, [da, db]: [f64; 2]) -> [f64; 2] {
        [(da - self.center * db) / self.scale, db]
    }
}

/// A log-likelihood evaluated in standardized coordinates.
pub(crate) struct Standardized<'a, L> {
    inner: &'a L,
    map: Standardization,
}

impl<'a, L: LogLikelihood> Standardized<'a, L> {
    pub(crate) fn new(inner: &'a L, map: Standardization) -> Self {
        Self { inner, map }
    }
}

impl<L: LogLikelihood> LogLikelihood for Standardized<'_, L> {
    fn value(&self, params: &LinearParams, data: &Dataset) -> f64 {
        self.inner.value(&self.map.to_original(*params), data)
    }

    fn gradient(&self, params: &LinearParams, data: &Dataset) -> [f64; 2] {
        let grad = self.inner.gradient(&self.map.to_original(*params), data);
        self.map.gradient_to_standard(grad)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;
    use crate::{GaussianLikelihood, log_likelihood};

    fn data() -> Dataset {
        Dataset::new(array![999., 1000., 1001., 1002.], array![1., 2., 2., 4.]).unwrap()
    }

    #[test]
    fn standardizes_mean_and_spread() {
        let map = Standardization::of(&data());

        assert_relative_eq!(map.center(), 1000.5);
        assert_relative_eq!(map.scale(), 1.25_f64.sqrt());
    }

    #[test]
    fn constant_x_keeps_unit_scale() {
        let data = Dataset::new(array![3., 3.], array![1., 2.]).unwrap();
        assert_eq!(Standardization::of(&data).scale(), 1.0);
    }

    #[test]
    fn both_coordinates_describe_the_same_line() {
        let map = Standardization::of(&data());
        let params = LinearParams::new(0.7, -3.0);
        let standard = map.to_standard(params);

        for x in [999.0, 1000.5, 1002.0] {
            let x_std = (x - map.center()) / map.scale();
            assert_relative_eq!(standard.a * x_std + standard.b, params.predict(x), epsilon = 1e-9);
        }

        let back = map.to_original(standard);
        assert_relative_eq!(back.a, params.a, epsilon = 1e-12);
        assert_relative_eq!(back.b, params.b, epsilon = 1e-9);
    }

    #[test]
    fn standardized_likelihood_matches_original() {
        let data = data();
        let map = Standardization::of(&data);
        let standardized = Standardized::new(&GaussianLikelihood, map);
        let params = LinearParams::new(0.4, -398.0);

        assert_relative_eq!(
            standardized.value(&map.to_standard(params), &data),
            log_likelihood(&params, &data),
            epsilon = 1e-9
        );
    }

    #[test]
    fn standardized_gradient_matches_finite_differences() {
        let data = data();
        let map = Standardization::of(&data);
        let standardized = Standardized::new(&GaussianLikelihood, map);
        let at = LinearParams::new(0.3, 1.9);
        let grad = standardized.gradient(&at, &data);

        let h = 1e-6;
        let f = |a: f64, b: f64| standardized.value(&LinearParams::new(a, b), &data);
        let da = (f(at.a + h, at.b) - f(at.a - h, at.b)) / (2.0 * h);
        let db = (f(at.a, at.b + h) - f(at.a, at.b - h)) / (2.0 * h);

        assert_relative_eq!(grad[0], da, epsilon = 1e-4);
        assert_relative_eq!(grad[1], db, epsilon = 1e-4);
    }
}
