//! Error types for BIF generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the record store and by BIF file persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Record store error: {0}")]
    DatabaseError(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write BIF file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("BIF file {path} would describe more than one document")]
    TargetCollision { path: PathBuf },
}

/// Top-level error for engine, configuration, and CLI operations.
#[derive(Debug, Error)]
pub enum BifError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    StorageError(#[from] StorageError),

    #[error("Invalid scan root {path}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("Malformed BIF content at line {line}: {reason}")]
    ParseError { line: usize, reason: String },
}

impl From<config::ConfigError> for BifError {
    fn from(err: config::ConfigError) -> Self {
        BifError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for BifError {
    fn from(err: std::io::Error) -> Self {
        BifError::StorageError(StorageError::IoError(err))
    }
}
