use ndarray::{Array1, ArrayView1};

use crate::{Dataset, LinearParams, MleErr, Result};

/// A converged maximum likelihood estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub params: LinearParams,
    /// The log-likelihood at `params`.
    pub log_likelihood: f64,
    pub iterations: u64,
}

impl Fit {
    /// The fitted line evaluated at every `x` in `data`.
    pub fn fitted(&self, data: &Dataset) -> Array1<f64> {
        data.fitted(&self.params)
    }

    /// `y - fitted` for every observation in `data`.
    pub fn residuals(&self, data: &Dataset) -> Array1<f64> {
        data.residuals(&self.params)
    }

    /// Bins the residuals of `data` into `bins` equal-width buckets.
    pub fn residual_histogram(&self, data: &Dataset, bins: usize) -> Result<Histogram> {
        Histogram::new(self.residuals(data).view(), bins)
    }
}

/// Equal-width histogram over the range of its values.
///
/// Every bin is half-open except the last one, which also holds the maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
}

impl Histogram {
    /// Creates a new `Histogram`.
    ///
    /// # Arguments
    /// * `values` - The values to bin, must be non-empty and finite.
    /// * `bins` - The amount of bins.
    ///
    /// # Returns
    /// An error if `bins` is zero or `values` is empty or has non-finite entries.
    pub fn new(values: ArrayView1<f64>, bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(MleErr::invalid("bins", "the histogram needs at least one bin"));
        }
        if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
            return Err(MleErr::invalid("values", "expected a non-empty set of finite values"));
        }

        let (mut low, mut high) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        if low == high {
            low -= 0.5;
            high += 0.5;
        }

        let width = (high - low) / bins as f64;
        let edges = (0..=bins).map(|i| low + width * i as f64).collect();

        let mut counts = vec![0; bins];
        for &v in values {
            let idx = (((v - low) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// The `bins + 1` bin boundaries, ascending.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Iterates over `(low, high, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}
