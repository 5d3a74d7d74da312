//! Storage error types shared by both backends.
//!
//! Not-found is never an error here: lookups return `Option` and deletes
//! return `bool`. Everything in this enum means the store itself failed.

use thiserror::Error;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Schema creation or backend opening failed. Fatal at startup.
    #[error("Storage initialization failed: {0}")]
    Initialization(String),

    /// Database error from rusqlite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error from the key-value store or data directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted blob could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value does not have the expected shape.
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// The backend was shut down.
    #[error("Storage has been shut down")]
    Closed,
}

impl StorageError {
    /// Wraps any error raised while bringing the store up.
    pub fn initialization(err: impl std::fmt::Display) -> Self {
        StorageError::Initialization(err.to_string())
    }

    pub fn is_initialization(&self) -> bool {
        matches!(self, StorageError::Initialization(_))
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
