//! Error types for viewr-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid sort direction: {0}")]
    InvalidDirection(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
