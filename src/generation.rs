use log::debug;
use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal, Uniform};

use crate::{Dataset, LinearParams, MleErr, Result};

/// Peak absolute value of the noise after normalization.
pub const NOISE_PEAK: f64 = 2.0;

/// Range the ground truth is drawn from when none is supplied.
pub const TRUTH_RANGE: (f64, f64) = (-2.0, 2.0);

/// Shape of a synthetic dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Number of observations.
    pub n: usize,
    /// `(low, high)` bounds `x` is drawn uniformly from.
    pub x_range: (f64, f64),
    /// Standard deviation of the raw noise draw, before normalization.
    pub noise_scale: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n: 500,
            x_range: (-3.0, 3.0),
            noise_scale: 1.0,
        }
    }
}

impl GeneratorConfig {
    /// Checks every field against its domain.
    ///
    /// # Returns
    /// `MleErr::InvalidConfiguration` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let (low, high) = self.x_range;

        if self.n == 0 {
            return Err(MleErr::invalid("n", "the sample count must be positive"));
        }
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(MleErr::invalid(
                "x_range",
                format!("expected finite low < high, got ({low}, {high})"),
            ));
        }
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(MleErr::invalid(
                "noise_scale",
                format!("must be positive, got {}", self.noise_scale),
            ));
        }

        Ok(())
    }
}

/// Produces noisy samples of a line, `y = a * x + b + r`.
///
/// The random source is owned by the generator so that a seeded generator replays the exact same
/// datasets.
pub struct SampleGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> SampleGenerator<R> {
    /// Creates a new `SampleGenerator`.
    ///
    /// # Arguments
    /// * `rng` - The random source every draw is taken from.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws a ground truth with `a` and `b` independently uniform in `range`.
    ///
    /// # Returns
    /// An error if the range is empty or not finite.
    pub fn draw_truth(&mut self, range: (f64, f64)) -> Result<LinearParams> {
        let (low, high) = range;
        let dist = Uniform::new(low, high)
            .map_err(|e| MleErr::invalid("truth_range", format!("({low}, {high}): {e}")))?;

        let a = dist.sample(&mut self.rng);
        let b = dist.sample(&mut self.rng);
        Ok(LinearParams::new(a, b))
    }

    /// Generates a dataset following `truth` with normal noise of scale `config.noise_scale`.
    ///
    /// # Arguments
    /// * `truth` - The parameters of the underlying line.
    /// * `config` - Sample count, `x` range and noise scale.
    ///
    /// # Returns
    /// The dataset, or an error if the configuration is invalid or the noise draw is degenerate.
    pub fn generate(&mut self, truth: LinearParams, config: &GeneratorConfig) -> Result<Dataset> {
        config.validate()?;

        let noise = Normal::new(0.0, config.noise_scale)
            .map_err(|e| MleErr::invalid("noise_scale", e.to_string()))?;

        self.generate_with_noise(truth, config, noise)
    }

    /// Same as [`generate`](Self::generate) but the raw noise is sampled from `noise` instead of
    /// a normal distribution. `config.noise_scale` is validated but otherwise unused.
    pub fn generate_with_noise<D>(
        &mut self,
        truth: LinearParams,
        config: &GeneratorConfig,
        noise: D,
    ) -> Result<Dataset>
    where
        D: Distribution<f64>,
    {
        config.validate()?;

        let (low, high) = config.x_range;
        let uniform = Uniform::new(low, high)
            .map_err(|e| MleErr::invalid("x_range", e.to_string()))?;

        let x = Array1::random_using(config.n, uniform, &mut self.rng);
        let raw = Array1::random_using(config.n, noise, &mut self.rng);
        let r = normalize_noise(raw)?;

        let y = x.mapv(|x| truth.a * x + truth.b) + &r;

        debug!(
            "generated {} samples for {truth}, x in [{low}, {high}), noise scale {}",
            config.n, config.noise_scale
        );

        Dataset::new(x, y)
    }
}

impl SampleGenerator<StdRng> {
    /// Creates a generator backed by a `StdRng`.
    ///
    /// # Arguments
    /// * `seed` - Seed for reproducible output. `None` seeds from the OS.
    pub fn seeded(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::new(rng)
    }
}

/// Rescales `raw` so that its largest absolute value is exactly [`NOISE_PEAK`]: `r = 2 * r / max|r|`.
///
/// # Returns
/// `MleErr::DegenerateNoise` if every value is zero (or the peak isn't finite).
pub fn normalize_noise(raw: Array1<f64>) -> Result<Array1<f64>> {
    let peak = raw.iter().fold(0.0_f64, |peak, r| peak.max(r.abs()));

    if peak == 0.0 || !peak.is_finite() {
        return Err(MleErr::DegenerateNoise);
    }

    Ok(raw.mapv_into(|r| NOISE_PEAK * r / peak))
}
