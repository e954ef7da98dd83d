//! Store error types
//!
//! Defines all errors that can occur while reading or writing the entry collection.

use thiserror::Error;

/// Errors that can occur in the entry store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of the entry collection failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Stored value under a key is not a valid entry list
    #[error("Malformed data under key '{key}': {reason}")]
    Malformed { key: String, reason: String },

    /// Backing key-value store cannot be reached (no window, storage disabled, quota)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
