//! Error types for ShelfDB
//!
//! Provides a unified error type for table, query and storage operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using ShelfError
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Unified error type for ShelfDB operations
#[derive(Debug, Error)]
pub enum ShelfError {
    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    /// `insert` target id already exists; nothing was written
    #[error("Record already present: {id}")]
    AlreadyPresent { id: String },

    #[error("Record not found: {id}")]
    NotFound { id: String },

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    /// The backing resource could not be created, read or written
    #[error("Storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to decode {}: {reason}", .path.display())]
    DecodeFailure { path: PathBuf, reason: String },

    #[error("Failed to encode {}: {reason}", .path.display())]
    EncodeFailure { path: PathBuf, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShelfError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShelfError::StorageUnavailable {
            path: path.into(),
            source,
        }
    }
}
