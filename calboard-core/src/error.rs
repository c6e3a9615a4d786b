//! Error types for calboard.

use thiserror::Error;

/// Errors that can occur while loading or persisting events.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for calboard operations.
pub type StoreResult<T> = Result<T, StoreError>;
