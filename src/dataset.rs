use ndarray::{Array1, ArrayView1, Zip};

use crate::{LinearParams, MleErr, Result};

/// Paired observations `(x_i, y_i)` stored column-wise.
///
/// Both columns always have the same, non-zero length.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The independent variable.
    /// * `y` - The dependent variable.
    ///
    /// # Returns
    /// An error if the columns differ in length or are empty.
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(MleErr::SizeMismatch {
                a: "x",
                b: "y",
                got: y.len(),
                expected: x.len(),
            });
        }

        if x.is_empty() {
            return Err(MleErr::invalid("dataset", "needs at least one observation"));
        }

        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// Computes `a * x_i + b` for every observation.
    pub fn fitted(&self, params: &LinearParams) -> Array1<f64> {
        self.x.mapv(|x| params.predict(x))
    }

    /// Computes `y_i - (a * x_i + b)` for every observation.
    pub fn residuals(&self, params: &LinearParams) -> Array1<f64> {
        Zip::from(&self.x)
            .and(&self.y)
            .map_collect(|&x, &y| y - params.predict(x))
    }

    /// Whether at least two observations have different `x`, i.e. whether the slope is
    /// identifiable.
    pub fn has_distinct_x(&self) -> bool {
        let first = self.x[0];
        self.x.iter().any(|&x| x != first)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn rejects_mismatched_columns() {
        let err = Dataset::new(array![1., 2., 3.], array![1., 2.]).unwrap_err();
        assert_eq!(
            err,
            MleErr::SizeMismatch {
                a: "x",
                b: "y",
                got: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn rejects_empty_columns() {
        let err = Dataset::new(Array1::zeros(0), Array1::zeros(0)).unwrap_err();
        assert!(matches!(err, MleErr::InvalidConfiguration { .. }));
    }

    #[test]
    fn residuals_are_observed_minus_fitted() {
        let data = Dataset::new(array![0., 1., 2.], array![1., 4., 4.]).unwrap();
        let params = LinearParams::new(2.0, 1.0);

        assert_eq!(data.fitted(&params), array![1., 3., 5.]);
        assert_eq!(data.residuals(&params), array![0., 1., -1.]);
    }

    #[test]
    fn distinct_x_detection() {
        let flat = Dataset::new(array![2., 2., 2.], array![0., 1., 2.]).unwrap();
        let spread = Dataset::new(array![2., 2., 3.], array![0., 1., 2.]).unwrap();

        assert!(!flat.has_distinct_x());
        assert!(spread.has_distinct_x());
    }
}
