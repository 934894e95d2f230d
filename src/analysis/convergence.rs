//! Convergence detection for Leibniz runs
//! Tracks per-iteration records and checks them against what the series guarantees

use crate::analysis::types::{ConvergenceReport, ErrorTrend, Side};
use crate::diagnostics::DiagnosticSink;
use crate::errors::{EstimatorError, Result};
use crate::types::{IterationCount, IterationRecord, RunSummary};
use chrono::Utc;
use std::collections::VecDeque;

/// Records needed before an error trend can be computed
const MIN_TREND_RECORDS: usize = 2;

/// Convergence detector configuration
#[derive(Debug, Clone)]
pub struct ConvergenceConfig {
    /// Maximum history size
    pub max_history: usize,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            max_history: 1_000_000,
        }
    }
}

/// Convergence detector for estimator runs
///
/// Implements [`DiagnosticSink`], so it can be handed straight to
/// `SeriesEstimator::run_with`.
#[derive(Debug, Clone)]
pub struct ConvergenceDetector {
    /// Configuration
    config: ConvergenceConfig,

    /// Record history
    history: VecDeque<IterationRecord>,

    /// Footer of the finished run
    summary: Option<RunSummary>,
}

impl ConvergenceDetector {
    /// Create new convergence detector with default configuration
    pub fn new() -> Self {
        Self::with_config(ConvergenceConfig::default())
    }

    /// Create convergence detector with custom configuration
    pub fn with_config(config: ConvergenceConfig) -> Self {
        Self {
            config,
            history: VecDeque::new(),
            summary: None,
        }
    }

    /// Record an iteration
    pub fn record(&mut self, record: IterationRecord) {
        self.history.push_back(record);

        // Maintain bounded history
        if self.history.len() > self.config.max_history {
            self.history.pop_front();
        }
    }

    /// Get record history
    pub fn history(&self) -> &VecDeque<IterationRecord> {
        &self.history
    }

    /// Get most recent record
    pub fn latest(&self) -> Option<&IterationRecord> {
        self.history.back()
    }

    /// Get footer of the finished run
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// Check that every partial sum lies on its expected side of pi
    ///
    /// Odd iterations overshoot and even iterations undershoot. An empty
    /// history is trivially alternating.
    pub fn is_alternating(&self) -> bool {
        self.history
            .iter()
            .all(|r| Side::of(r.estimate) == Side::expected_for(r.iteration))
    }

    /// Compare mean error of the first and second half of the history
    pub fn error_trend(&self) -> ErrorTrend {
        if self.history.len() < MIN_TREND_RECORDS {
            return ErrorTrend::InsufficientData {
                records_needed: MIN_TREND_RECORDS - self.history.len(),
            };
        }

        let mid = self.history.len() / 2;
        let first = mean_error(self.history.iter().take(mid));
        let second = mean_error(self.history.iter().skip(mid));

        ErrorTrend::from_means(first, second)
    }

    /// Build a report from the recorded run
    ///
    /// Falls back to the latest record when no footer was received, and to
    /// an empty run when there is nothing at all.
    pub fn report(&self) -> ConvergenceReport {
        let summary = self.summary.unwrap_or_else(|| match self.latest() {
            Some(r) => RunSummary::new(IterationCount::new(r.iteration), r.estimate),
            None => RunSummary::new(IterationCount::new(0), 0.0),
        });

        ConvergenceReport {
            method: "leibniz".to_string(),
            iterations: summary.iterations,
            estimate: summary.estimate,
            error: summary.error,
            error_bound: error_bound(summary.iterations.get()),
            alternating: self.is_alternating(),
            trend: self.error_trend(),
            generated_at: Utc::now(),
            history: self.history.iter().copied().collect(),
        }
    }

    /// Reset detector state
    pub fn reset(&mut self) {
        self.history.clear();
        self.summary = None;
    }

    /// Get configuration
    pub fn config(&self) -> &ConvergenceConfig {
        &self.config
    }
}

impl Default for ConvergenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSink for ConvergenceDetector {
    fn header(&mut self, _iterations: IterationCount) {
        self.reset();
    }

    fn iteration(&mut self, record: &IterationRecord) {
        self.record(*record);
    }

    fn footer(&mut self, summary: &RunSummary) {
        self.summary = Some(*summary);
    }
}

/// Alternating-series bound on `|pi - S_n|` after `terms` terms
///
/// The remainder never exceeds the first omitted term, `4 / (2n + 1)`.
pub fn error_bound(terms: usize) -> f64 {
    4.0 / (2.0 * terms as f64 + 1.0)
}

/// Smallest number of terms whose error bound is within `tolerance`
pub fn terms_for_tolerance(tolerance: f64) -> Result<u64> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(EstimatorError::ConfigError(format!(
            "tolerance must be a positive finite number, got {}",
            tolerance
        )));
    }

    let estimate = ((4.0 / tolerance - 1.0) / 2.0).ceil().max(0.0);
    if estimate >= u64::MAX as f64 {
        return Err(EstimatorError::ConfigError(format!(
            "tolerance {} needs more terms than can be counted",
            tolerance
        )));
    }

    // Correct for rounding in the closed form
    let mut terms = estimate as u64;
    while error_bound(terms as usize) > tolerance {
        terms += 1;
    }
    while terms > 0 && error_bound(terms as usize - 1) <= tolerance {
        terms -= 1;
    }

    Ok(terms)
}

fn mean_error<'a>(records: impl Iterator<Item = &'a IterationRecord>) -> f64 {
    let (sum, count) = records.fold((0.0, 0usize), |(sum, count), r| (sum + r.error, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
