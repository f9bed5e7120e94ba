//! Error types raised by key-value store implementations.

use thiserror::Error;

/// Errors surfaced by stores. The repository never lets these escape.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
