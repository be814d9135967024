//! Common error types for the AQI service

use thiserror::Error;

/// Common result type for AQI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the AQI crates
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or non-numeric input field
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Regression model could not be loaded or is malformed
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
