//! Leibniz series for pi
//!
//! pi/4 = 1 - 1/3 + 1/5 - 1/7 + ..., so every term of the scaled series is
//! `4 * (-1)^n / (2n + 1)`.

pub mod estimator;
pub mod term;

pub use estimator::{estimate_pi, EstimatorConfig, SeriesEstimator};
pub use term::leibniz_term;
