//! Type definitions module
//!
//! Value types shared by the estimator, the diagnostic sinks and the
//! convergence analysis.

pub mod iteration;

// Re-export commonly used types
pub use iteration::{IterationCount, IterationRecord, RunSummary};
