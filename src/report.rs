use std::fmt::{self, Display};

use log::info;

use crate::{
    Dataset, Fit, Histogram, LinearParams, MleEstimator, Result,
    config::{MinimizerKind, RunConfig},
    generation::{SampleGenerator, TRUTH_RANGE},
    optimization::{GradientDescent, Lbfgs, NelderMead},
};

/// Outcome of a report run: the ground truth next to its estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub truth: LinearParams,
    pub fit: Fit,
    pub residuals: Histogram,
}

impl Report {
    /// Renders the residual histogram as one `[low, high) count` line per bin.
    pub fn histogram_table(&self) -> String {
        let rows: String = self
            .residuals
            .bins()
            .map(|(low, high, count)| {
                format!("[{low:>8.4}, {high:>8.4}) {count:>5} {}\n", "#".repeat(count))
            })
            .collect();

        format!("Residual distribution:\n{rows}")
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MLE Estimate for 'a': {}", self.fit.params.a)?;
        writeln!(f, "True a : {}", self.truth.a)?;
        writeln!(f, "MLE Estimate for 'b': {}", self.fit.params.b)?;
        writeln!(f, "True b : {}", self.truth.b)
    }
}

/// Generates a dataset according to `config` and estimates its parameters.
///
/// # Returns
/// The report, or the first error raised by generation or estimation.
pub fn run(config: &RunConfig) -> Result<Report> {
    let mut generator = SampleGenerator::seeded(config.seed);

    let truth = match config.truth {
        Some(truth) => truth,
        None => generator.draw_truth(TRUTH_RANGE)?,
    };
    info!("true parameters {truth}");

    let data = generator.generate(truth, &config.generator_config())?;
    let fit = estimate(config, &data)?;
    let residuals = fit.residual_histogram(&data, config.histogram_bins)?;

    Ok(Report {
        truth,
        fit,
        residuals,
    })
}

fn estimate(config: &RunConfig, data: &Dataset) -> Result<Fit> {
    match config.minimizer {
        MinimizerKind::Lbfgs => {
            let mut minimizer = Lbfgs::new();
            if let Some(max_iters) = config.max_iters {
                minimizer = minimizer.with_max_iters(max_iters);
            }
            if let Some(tolerance) = config.tolerance {
                minimizer = minimizer.with_tolerance(tolerance);
            }
            MleEstimator::with_minimizer(minimizer).fit(data)
        }
        MinimizerKind::NelderMead => {
            let mut minimizer = NelderMead::new();
            if let Some(max_iters) = config.max_iters {
                minimizer = minimizer.with_max_iters(max_iters);
            }
            if let Some(tolerance) = config.tolerance {
                minimizer = minimizer.with_tolerance(tolerance);
            }
            MleEstimator::with_minimizer(minimizer).fit(data)
        }
        MinimizerKind::GradientDescent => {
            let mut minimizer = GradientDescent::new(config.learning_rate);
            if let Some(max_iters) = config.max_iters {
                minimizer = minimizer.with_max_iters(max_iters);
            }
            if let Some(tolerance) = config.tolerance {
                minimizer = minimizer.with_tolerance(tolerance);
            }
            MleEstimator::with_minimizer(minimizer).fit(data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MleErr;

    fn seeded(minimizer: MinimizerKind) -> RunConfig {
        RunConfig {
            truth: Some(LinearParams::new(0.5, 0.5)),
            seed: Some(42),
            minimizer,
            ..Default::default()
        }
    }

    #[test]
    fn prints_four_labeled_lines() {
        let report = Report {
            truth: LinearParams::new(0.5, -1.0),
            fit: Fit {
                params: LinearParams::new(0.25, -0.75),
                log_likelihood: -1.0,
                iterations: 3,
            },
            residuals: Histogram::new(ndarray::array![0.0, 1.0].view(), 1).unwrap(),
        };

        assert_eq!(
            report.to_string(),
            "MLE Estimate for 'a': 0.25\nTrue a : 0.5\nMLE Estimate for 'b': -0.75\nTrue b : -1\n"
        );
    }

    #[test]
    fn every_minimizer_recovers_the_truth() {
        for kind in [
            MinimizerKind::Lbfgs,
            MinimizerKind::NelderMead,
            MinimizerKind::GradientDescent,
        ] {
            let report = run(&seeded(kind)).unwrap();

            assert!((report.fit.params.a - 0.5).abs() < 0.3, "{kind:?}: {report}");
            assert!((report.fit.params.b - 0.5).abs() < 0.3, "{kind:?}: {report}");
            assert_eq!(report.residuals.counts().iter().sum::<usize>(), 500);
        }
    }

    #[test]
    fn missing_truth_is_drawn_in_range() {
        let config = RunConfig {
            seed: Some(5),
            ..Default::default()
        };
        let report = run(&config).unwrap();

        assert!((-2.0..2.0).contains(&report.truth.a));
        assert!((-2.0..2.0).contains(&report.truth.b));
    }

    #[test]
    fn same_seed_same_report() {
        let config = RunConfig {
            seed: Some(8),
            ..Default::default()
        };

        assert_eq!(run(&config).unwrap(), run(&config).unwrap());
    }

    #[test]
    fn histogram_table_has_one_line_per_bin() {
        let report = run(&RunConfig {
            histogram_bins: 12,
            ..seeded(MinimizerKind::Lbfgs)
        })
        .unwrap();

        assert_eq!(report.histogram_table().lines().count(), 13);
    }

    #[test]
    fn invalid_generation_settings_surface() {
        let config = RunConfig {
            noise_scale: -1.0,
            ..seeded(MinimizerKind::Lbfgs)
        };

        assert!(matches!(
            run(&config).unwrap_err(),
            MleErr::InvalidConfiguration { what: "noise_scale", .. }
        ));
    }
}
