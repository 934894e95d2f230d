//! Iteration-level value types
//!
//! `IterationCount` is the validated number of series terms to sum,
//! `IterationRecord` is what a verbose run reports after every term and
//! `RunSummary` is the footer written once the loop finishes.

use crate::errors::{EstimatorError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Number of series terms summed when nothing else is requested
pub const DEFAULT_ITERATIONS: usize = 20;

/// Number of series terms to sum
///
/// Always non-negative. Signed input goes through `TryFrom<i64>`, which
/// rejects negative values instead of clamping them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IterationCount(usize);

impl IterationCount {
    /// Create an iteration count
    pub fn new(count: usize) -> Self {
        Self(count)
    }

    /// Get the raw count
    pub fn get(&self) -> usize {
        self.0
    }

    /// Check for the empty run
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for IterationCount {
    fn default() -> Self {
        Self(DEFAULT_ITERATIONS)
    }
}

impl TryFrom<i64> for IterationCount {
    type Error = EstimatorError;

    fn try_from(requested: i64) -> Result<Self> {
        usize::try_from(requested)
            .map(Self)
            .map_err(|_| EstimatorError::InvalidIterationCount { requested })
    }
}

impl fmt::Display for IterationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Diagnostic record emitted after each term is added
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// 1-based iteration number
    pub iteration: usize,

    /// Running estimate after this iteration
    pub estimate: f64,

    /// Absolute distance from pi
    pub error: f64,
}

impl IterationRecord {
    /// Build a record for the estimate reached after `iteration` terms
    pub fn new(iteration: usize, estimate: f64) -> Self {
        Self {
            iteration,
            estimate,
            error: absolute_error(estimate),
        }
    }

    /// True when the estimate overshoots pi
    pub fn is_above_pi(&self) -> bool {
        self.estimate > PI
    }
}

/// Footer of a run: the final estimate and its error
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of terms summed
    pub iterations: IterationCount,

    /// Final estimate
    pub estimate: f64,

    /// Absolute distance from pi
    pub error: f64,
}

impl RunSummary {
    /// Build the summary for a finished run
    pub fn new(iterations: IterationCount, estimate: f64) -> Self {
        Self {
            iterations,
            estimate,
            error: absolute_error(estimate),
        }
    }
}

/// Absolute difference between pi and an estimate
pub fn absolute_error(estimate: f64) -> f64 {
    (PI - estimate).abs()
}
