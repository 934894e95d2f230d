//! leibniz-pi - Estimate pi with the Leibniz series
//!
//! Sums `4 * (1 - 1/3 + 1/5 - 1/7 + ...)` term by term and optionally
//! reports every partial sum together with its distance from pi.
//!
//! ```
//! let estimate = leibniz_pi::estimate_pi(3, false);
//! assert!((estimate - (4.0 - 4.0 / 3.0 + 4.0 / 5.0)).abs() < 1e-10);
//! ```
//!
//! # Architecture
//!
//! - **series**: term function and the accumulation loop
//! - **diagnostics**: sinks that receive per-iteration records
//! - **analysis**: alternation, error trend and remainder bounds
//! - **cli** / **execution**: argument parsing, config file and the binary's run path

pub mod errors;
pub mod types;
pub mod series;
pub mod diagnostics;
pub mod analysis;

// Re-export commonly used types
pub use errors::{EstimatorError, Result};
pub use series::{estimate_pi, leibniz_term, EstimatorConfig, SeriesEstimator};
pub use types::{IterationCount, IterationRecord, RunSummary};

// Command-line surface
pub mod cli;
pub mod execution;
