//! Error types for rollcall-core

use thiserror::Error;

/// Main error type for the rollcall-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed calendar date (expected YYYY-MM-DD)
    #[error("invalid date format: {0}")]
    InvalidDate(String),

    /// Student not found in the roster
    #[error("student not found: {0}")]
    StudentNotFound(String),
}

/// Result type alias for rollcall-core
pub type Result<T> = std::result::Result<T, Error>;
