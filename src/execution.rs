//! Shared run logic for the command line
//!
//! Resolves flags against the config file, runs the estimator with the
//! right sinks and writes the result in the requested format. Writing to a
//! generic writer keeps the whole path testable without a terminal.

use crate::analysis::{error_bound, ConvergenceDetector, ErrorTrend};
use crate::cli::{Args, Config, OutputFormat, Verbosity};
use crate::diagnostics::TextSink;
use crate::errors::{EstimatorError, Result};
use crate::series::{EstimatorConfig, SeriesEstimator};
use crate::types::IterationCount;
use std::io::{ErrorKind, Write};

/// Fully resolved settings for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSettings {
    pub iterations: IterationCount,
    pub verbosity: Verbosity,
    pub format: OutputFormat,
    pub color: bool,
}

impl RunSettings {
    /// Combine command-line flags with the config file; flags win
    pub fn resolve(args: &Args, config: &Config) -> Result<Self> {
        let iterations = match args.iterations {
            Some(requested) => IterationCount::try_from(requested)?,
            None => config.iteration_count()?,
        };

        let verbosity = match args.verbosity() {
            Verbosity::Normal if !config.estimator.verbose => Verbosity::Quiet,
            v => v,
        };

        let format = match args.format {
            Some(format) => format,
            None => config.output_format()?,
        };

        Ok(Self {
            iterations,
            verbosity,
            format,
            color: config.output.color && !args.no_color,
        })
    }

    /// Estimator configuration for these settings
    ///
    /// JSON reports need the per-iteration records, so they run verbose even
    /// though nothing is printed per iteration.
    pub fn estimator_config(&self) -> EstimatorConfig {
        EstimatorConfig {
            iterations: self.iterations,
            verbose: self.format == OutputFormat::Json || self.verbosity.show_diagnostics(),
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            iterations: IterationCount::default(),
            verbosity: Verbosity::Normal,
            format: OutputFormat::Text,
            color: false,
        }
    }
}

/// Run the estimator and write its output to `out`
///
/// Returns the final estimate.
pub fn execute<W: Write>(settings: &RunSettings, out: &mut W) -> Result<f64> {
    let estimator = SeriesEstimator::with_config(settings.estimator_config());

    match settings.format {
        OutputFormat::Json => {
            let mut detector = ConvergenceDetector::new();
            let estimate = estimator.run_with(&mut detector);
            writeln!(out, "{}", detector.report().to_json()?)?;
            Ok(estimate)
        }
        OutputFormat::Text if settings.verbosity.show_analysis() => {
            let mut text = TextSink::new(&mut *out, settings.color);
            let mut detector = ConvergenceDetector::new();
            let estimate = estimator.run_with((&mut text, &mut detector));

            if let Some(e) = text.take_error() {
                return Err(e.into());
            }

            write_analysis(&detector, out)?;
            Ok(estimate)
        }
        OutputFormat::Text if settings.verbosity.show_diagnostics() => {
            let mut text = TextSink::new(&mut *out, settings.color);
            let estimate = estimator.run_with(&mut text);

            match text.take_error() {
                Some(e) => Err(e.into()),
                None => Ok(estimate),
            }
        }
        OutputFormat::Text => {
            let estimate = estimator.run_with(crate::diagnostics::NullSink);
            writeln!(out, "{}", estimate)?;
            Ok(estimate)
        }
    }
}

/// True when the error only means the reader went away (`leibniz-pi | head`)
pub fn is_broken_pipe(err: &EstimatorError) -> bool {
    matches!(err, EstimatorError::IoError(e) if e.kind() == ErrorKind::BrokenPipe)
}

fn write_analysis<W: Write>(detector: &ConvergenceDetector, out: &mut W) -> Result<()> {
    let terms = detector.summary().map_or(0, |s| s.iterations.get());

    writeln!(out, "Convergence analysis:")?;
    writeln!(
        out,
        "  Alternating:  {}",
        if detector.is_alternating() { "yes" } else { "no" }
    )?;

    match detector.error_trend() {
        ErrorTrend::Decreasing {
            first_half_mean,
            second_half_mean,
        } => writeln!(
            out,
            "  Error trend:  decreasing (mean error {} -> {})",
            first_half_mean, second_half_mean
        )?,
        ErrorTrend::NotDecreasing {
            first_half_mean,
            second_half_mean,
        } => writeln!(
            out,
            "  Error trend:  not decreasing (mean error {} -> {})",
            first_half_mean, second_half_mean
        )?,
        ErrorTrend::InsufficientData { records_needed } => writeln!(
            out,
            "  Error trend:  needs {} more iteration(s)",
            records_needed
        )?,
    }

    writeln!(out, "  Error bound:  {}", error_bound(terms))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run(settings: RunSettings) -> (f64, String) {
        let mut out = Vec::new();
        let estimate = execute(&settings, &mut out).unwrap();
        (estimate, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_resolve_defaults() {
        let args = Args::parse_from(["leibniz-pi"]);
        let settings = RunSettings::resolve(&args, &Config::default()).unwrap();
        assert_eq!(settings.iterations.get(), 20);
        assert_eq!(settings.verbosity, Verbosity::Normal);
        assert_eq!(settings.format, OutputFormat::Text);
        assert!(settings.color);
    }

    #[test]
    fn test_resolve_flags_override_config() {
        let args = Args::parse_from(["leibniz-pi", "-n", "7", "--format", "json", "--no-color"]);
        let mut config = Config::default();
        config.estimator.iterations = 100;
        let settings = RunSettings::resolve(&args, &config).unwrap();
        assert_eq!(settings.iterations.get(), 7);
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(!settings.color);
    }

    #[test]
    fn test_resolve_rejects_negative_iterations() {
        let args = Args::parse_from(["leibniz-pi", "-n", "-4"]);
        assert!(RunSettings::resolve(&args, &Config::default()).is_err());
    }

    #[test]
    fn test_config_verbose_false_means_quiet() {
        let args = Args::parse_from(["leibniz-pi"]);
        let mut config = Config::default();
        config.estimator.verbose = false;
        let settings = RunSettings::resolve(&args, &config).unwrap();
        assert_eq!(settings.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_text_run_writes_diagnostics() {
        let (estimate, out) = run(RunSettings {
            iterations: IterationCount::new(3),
            ..RunSettings::default()
        });
        assert!(out.contains("Iteration 1:"));
        assert!(out.contains("Iteration 3:"));
        assert!(out.contains(&format!("Final estimate of pi after 3 iterations: {}", estimate)));
        assert!(!out.contains("Convergence analysis"));
    }

    #[test]
    fn test_verbose_run_adds_analysis() {
        let (_, out) = run(RunSettings {
            verbosity: Verbosity::Verbose,
            ..RunSettings::default()
        });
        assert!(out.contains("Convergence analysis:"));
        assert!(out.contains("Alternating:  yes"));
        assert!(out.contains("Error trend:  decreasing"));
    }

    #[test]
    fn test_quiet_run_prints_only_estimate() {
        let (estimate, out) = run(RunSettings {
            verbosity: Verbosity::Quiet,
            ..RunSettings::default()
        });
        assert_eq!(out, format!("{}\n", estimate));
    }

    #[test]
    fn test_json_run_writes_report() {
        let (estimate, out) = run(RunSettings {
            iterations: IterationCount::new(5),
            format: OutputFormat::Json,
            ..RunSettings::default()
        });
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["iterations"], 5);
        assert!((value["estimate"].as_f64().unwrap() - estimate).abs() < 1e-12);
        assert_eq!(value["history"].as_array().unwrap().len(), 5);
        assert!(!out.contains("Iteration 1:"));
    }

    #[test]
    fn test_closed_reader_reported_as_broken_pipe() {
        let err = execute(&RunSettings::default(), &mut ClosedPipe).unwrap_err();
        assert!(is_broken_pipe(&err));
    }

    #[test]
    fn test_other_errors_are_not_broken_pipe() {
        let err = EstimatorError::InvalidIterationCount { requested: -1 };
        assert!(!is_broken_pipe(&err));
        let io = EstimatorError::IoError(io::Error::new(ErrorKind::PermissionDenied, "denied"));
        assert!(!is_broken_pipe(&io));
    }

    #[test]
    fn test_setting_names_for_logging() {
        let settings = RunSettings::default();
        assert_eq!(settings.verbosity.as_str(), "normal");
        assert_eq!(settings.format.as_str(), "text");
        assert_eq!(OutputFormat::Json.as_str(), "json");
    }
}
