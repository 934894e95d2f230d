//! Error types for leibniz-pi
//!
//! The series itself cannot fail; everything here comes from the shell
//! around it (argument validation, configuration, output).

use thiserror::Error;

/// Main error type for the estimator
#[derive(Error, Debug)]
pub enum EstimatorError {
    /// Iteration counts must be non-negative
    #[error("Invalid iteration count {requested}: must be zero or greater")]
    InvalidIterationCount { requested: i64 },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Unknown output format
    #[error("Unknown output format '{0}' (expected 'text' or 'json')")]
    InvalidFormat(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for estimator operations
pub type Result<T> = std::result::Result<T, EstimatorError>;
