//! Analysis system type definitions

use crate::types::{IterationCount, IterationRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Which side of pi an estimate lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Above,
    Below,
    Exact,
}

impl Side {
    /// Classify an estimate
    pub fn of(estimate: f64) -> Self {
        if estimate > PI {
            Side::Above
        } else if estimate < PI {
            Side::Below
        } else {
            Side::Exact
        }
    }

    /// Side a Leibniz partial sum of `iteration` terms must lie on
    ///
    /// Odd partial sums overshoot, even ones undershoot.
    pub fn expected_for(iteration: usize) -> Self {
        if iteration % 2 == 1 {
            Side::Above
        } else {
            Side::Below
        }
    }
}

/// Overall error trend across a run
///
/// The Leibniz error oscillates, so the trend compares the mean absolute
/// error of the first half of the history with that of the second half.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorTrend {
    /// Later iterations are closer to pi on average
    Decreasing {
        first_half_mean: f64,
        second_half_mean: f64,
    },

    /// Later iterations are not closer on average
    NotDecreasing {
        first_half_mean: f64,
        second_half_mean: f64,
    },

    /// Insufficient data
    InsufficientData { records_needed: usize },
}

impl ErrorTrend {
    /// Compare the two half means
    pub fn from_means(first_half_mean: f64, second_half_mean: f64) -> Self {
        if second_half_mean < first_half_mean {
            ErrorTrend::Decreasing {
                first_half_mean,
                second_half_mean,
            }
        } else {
            ErrorTrend::NotDecreasing {
                first_half_mean,
                second_half_mean,
            }
        }
    }

    /// Check if decreasing
    pub fn is_decreasing(&self) -> bool {
        matches!(self, ErrorTrend::Decreasing { .. })
    }
}

/// Machine-readable account of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceReport {
    /// Series method
    pub method: String,

    /// Number of terms summed
    pub iterations: IterationCount,

    /// Final estimate
    pub estimate: f64,

    /// Absolute distance from pi
    pub error: f64,

    /// Alternating-series guarantee on the error
    pub error_bound: f64,

    /// Every partial sum lay on its expected side of pi
    pub alternating: bool,

    /// Error trend over the recorded history
    pub trend: ErrorTrend,

    /// Report creation time
    pub generated_at: DateTime<Utc>,

    /// Per-iteration records
    pub history: Vec<IterationRecord>,
}

impl ConvergenceReport {
    /// Serialize as pretty JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
