//! Series estimator
//!
//! Sums the first N Leibniz terms strictly in ascending order and, when
//! verbose, reports every partial sum to a diagnostic sink.

use crate::diagnostics::{DiagnosticSink, NullSink, TextSink};
use crate::series::term::leibniz_term;
use crate::types::{IterationCount, IterationRecord, RunSummary};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Estimator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Number of terms to sum
    pub iterations: IterationCount,

    /// Emit header, per-iteration records and footer
    pub verbose: bool,
}

impl EstimatorConfig {
    /// Configuration for `iterations` terms
    pub fn new(iterations: usize, verbose: bool) -> Self {
        Self {
            iterations: IterationCount::new(iterations),
            verbose,
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            iterations: IterationCount::default(),
            verbose: true,
        }
    }
}

/// Leibniz series estimator
///
/// Holds configuration only. Every run starts from a fresh accumulator, so a
/// single estimator can be shared between threads and reused freely.
#[derive(Debug, Clone, Default)]
pub struct SeriesEstimator {
    config: EstimatorConfig,
}

impl SeriesEstimator {
    /// Create estimator with default configuration (20 terms, verbose)
    pub fn new() -> Self {
        Self::with_config(EstimatorConfig::default())
    }

    /// Create estimator with custom configuration
    pub fn with_config(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Run with diagnostics on standard output
    pub fn run(&self) -> f64 {
        self.run_to(io::stdout())
    }

    /// Run with plain-text diagnostics written to `writer`
    ///
    /// A quiet run never writes to `writer`.
    pub fn run_to<W: Write>(&self, writer: W) -> f64 {
        if self.config.verbose {
            self.run_with(TextSink::new(writer, false))
        } else {
            self.run_with(NullSink)
        }
    }

    /// Run, sending diagnostics to `sink` when verbose
    ///
    /// The sink is never called on a quiet run.
    pub fn run_with<S: DiagnosticSink>(&self, mut sink: S) -> f64 {
        let iterations = self.config.iterations;
        let verbose = self.config.verbose;

        tracing::debug!(iterations = iterations.get(), verbose, "starting estimate");

        if verbose {
            sink.header(iterations);
        }

        let mut estimate = 0.0;
        for n in 0..iterations.get() {
            estimate += leibniz_term(n as u64);

            if verbose {
                sink.iteration(&IterationRecord::new(n + 1, estimate));
            }
        }

        let summary = RunSummary::new(iterations, estimate);
        if verbose {
            sink.footer(&summary);
        }

        tracing::debug!(estimate, error = summary.error, "estimate finished");
        estimate
    }
}

/// Estimate pi from the first `iterations` terms of the Leibniz series
///
/// With `verbose` set, the diagnostic stream is written to stdout.
pub fn estimate_pi(iterations: usize, verbose: bool) -> f64 {
    SeriesEstimator::with_config(EstimatorConfig::new(iterations, verbose)).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use std::f64::consts::PI;

    fn quiet(iterations: usize) -> f64 {
        estimate_pi(iterations, false)
    }

    #[test]
    fn test_default_config() {
        let estimator = SeriesEstimator::new();
        assert_eq!(estimator.config().iterations.get(), 20);
        assert!(estimator.config().verbose);
    }

    #[test]
    fn test_zero_iterations() {
        assert_eq!(quiet(0), 0.0);
    }

    #[test]
    fn test_small_counts() {
        assert_eq!(quiet(1), 4.0);
        assert!((quiet(2) - (4.0 - 4.0 / 3.0)).abs() < 1e-10);
        assert!((quiet(3) - (4.0 - 4.0 / 3.0 + 4.0 / 5.0)).abs() < 1e-10);
    }

    #[test]
    fn test_left_to_right_accumulation() {
        let mut expected = 0.0;
        for n in 0..500u64 {
            expected += leibniz_term(n);
        }
        assert_eq!(quiet(500), expected);
    }

    #[test]
    fn test_quiet_run_never_touches_sink() {
        let estimator = SeriesEstimator::with_config(EstimatorConfig::new(5, false));
        let mut sink = RecordingSink::new();
        estimator.run_with(&mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_verbose_run_reports_every_iteration() {
        let estimator = SeriesEstimator::with_config(EstimatorConfig::new(4, true));
        let mut sink = RecordingSink::new();
        let estimate = estimator.run_with(&mut sink);

        assert_eq!(sink.headers(), &[IterationCount::new(4)]);
        let iterations: Vec<usize> = sink.records().iter().map(|r| r.iteration).collect();
        assert_eq!(iterations, vec![1, 2, 3, 4]);
        assert_eq!(sink.records()[3].estimate, estimate);

        let summary = sink.summary().unwrap();
        assert_eq!(summary.estimate, estimate);
        assert_eq!(summary.error, (PI - estimate).abs());
    }

    #[test]
    fn test_verbose_empty_run_has_header_and_footer_only() {
        let estimator = SeriesEstimator::with_config(EstimatorConfig::new(0, true));
        let mut sink = RecordingSink::new();
        let estimate = estimator.run_with(&mut sink);

        assert_eq!(estimate, 0.0);
        assert_eq!(sink.headers().len(), 1);
        assert!(sink.records().is_empty());
        assert_eq!(sink.summary().unwrap().error, PI);
    }

    #[test]
    fn test_quiet_text_run_writes_nothing() {
        let mut out = Vec::new();
        let estimate = SeriesEstimator::with_config(EstimatorConfig::new(5, false)).run_to(&mut out);
        assert!(out.is_empty());
        assert_eq!(estimate, quiet(5));
    }

    #[test]
    fn test_default_text_run_writes_diagnostics() {
        let mut out = Vec::new();
        let estimate = SeriesEstimator::new().run_to(&mut out);
        let out = String::from_utf8(out).unwrap();

        assert!(out.lines().count() > 0);
        assert!(out.starts_with("Estimating pi using the Leibniz series over 20 iterations:"));
        assert_eq!(out.matches("Iteration ").count(), 20);
        assert!(out.contains(&format!("Final estimate of pi after 20 iterations: {}", estimate)));
    }

    #[test]
    fn test_diagnostics_do_not_change_result() {
        let loud = SeriesEstimator::with_config(EstimatorConfig::new(37, true));
        let value = loud.run_with(RecordingSink::new());
        assert_eq!(value, quiet(37));
    }
}
