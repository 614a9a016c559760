use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{GeneratorConfig, LinearParams, MleErr, Result};

/// Which minimizer drives the estimation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimizerKind {
    #[default]
    Lbfgs,
    NelderMead,
    GradientDescent,
}

/// Settings of a report run, usually read from a JSON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Ground truth. Drawn uniformly from `[-2, 2)` when missing.
    pub truth: Option<LinearParams>,
    pub samples: usize,
    pub x_low: f64,
    pub x_high: f64,
    pub noise_scale: f64,
    /// Seed for the random source, `None` seeds from the OS.
    pub seed: Option<u64>,
    pub minimizer: MinimizerKind,
    /// Overrides the minimizer's default iteration budget.
    pub max_iters: Option<u64>,
    /// Overrides the minimizer's default convergence tolerance.
    pub tolerance: Option<f64>,
    /// Only used by gradient descent.
    pub learning_rate: f64,
    pub histogram_bins: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        let generator = GeneratorConfig::default();

        Self {
            truth: None,
            samples: generator.n,
            x_low: generator.x_range.0,
            x_high: generator.x_range.1,
            noise_scale: generator.noise_scale,
            seed: None,
            minimizer: MinimizerKind::default(),
            max_iters: None,
            tolerance: None,
            learning_rate: 1e-4,
            histogram_bins: 30,
        }
    }
}

impl RunConfig {
    /// Loads a `RunConfig` from a JSON file.
    ///
    /// # Errors
    /// `MleErr::Config` if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| MleErr::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json(&content).map_err(|e| match e {
            MleErr::Config { reason, .. } => MleErr::Config {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parses a `RunConfig` from a JSON document.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| MleErr::Config {
            path: "<inline>".into(),
            reason: format!("invalid JSON: {e}"),
        })
    }

    /// The sample generation part of the settings.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            n: self.samples,
            x_range: (self.x_low, self.x_high),
            noise_scale: self.noise_scale,
        }
    }
}
