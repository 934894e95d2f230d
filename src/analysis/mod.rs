//! Convergence analysis for Leibniz runs
//! Provides alternation checks, error-trend detection and remainder bounds

pub mod convergence;
pub mod types;

pub use convergence::{error_bound, terms_for_tolerance, ConvergenceConfig, ConvergenceDetector};
pub use types::{ConvergenceReport, ErrorTrend, Side};
