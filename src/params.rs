use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Slope and intercept of the line `y = a * x + b`.
///
/// Used both for the ground truth of a generation run and for the estimates returned by
/// [`MleEstimator`](crate::MleEstimator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub a: f64,
    pub b: f64,
}

impl LinearParams {
    /// Returns a new `LinearParams`.
    ///
    /// # Arguments
    /// * `a` - The slope.
    /// * `b` - The intercept.
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Evaluates the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.a * x + self.b
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite()
    }

    pub(crate) fn to_vec(self) -> Vec<f64> {
        vec![self.a, self.b]
    }

    pub(crate) fn from_slice(theta: &[f64]) -> Self {
        Self::new(theta[0], theta[1])
    }
}

impl From<(f64, f64)> for LinearParams {
    fn from((a, b): (f64, f64)) -> Self {
        Self::new(a, b)
    }
}

impl Display for LinearParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(a = {}, b = {})", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_evaluates_the_line() {
        let params = LinearParams::new(2.0, -1.0);
        assert_eq!(params.predict(0.0), -1.0);
        assert_eq!(params.predict(3.0), 5.0);
    }

    #[test]
    fn deserializes_from_json_object() {
        let params: LinearParams = serde_json::from_str(r#"{"a": 0.5, "b": -1.25}"#).unwrap();
        assert_eq!(params, LinearParams::new(0.5, -1.25));
    }
}
