//! Error type shared by the storage, import and session layers.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid quality rating {0}, expected 1 (hard), 3 (good) or 5 (easy)")]
    InvalidQuality(u8),

    #[error("unknown word status: {0:?}")]
    InvalidStatus(String),

    #[error("invalid scope name {0:?}: must be non-empty and must not contain '_'")]
    InvalidScope(String),

    #[error("word list {0:?} contains no words")]
    EmptyWordList(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
