pub mod database;
pub mod session_store;

pub use session_store::SessionStore;

use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to encode transcript: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("stored transcript `{key}` is unreadable: {source}")]
    CorruptTranscript {
        key: String,
        source: serde_json::Error,
    },

    #[error("failed to prepare session directory: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Ensure the parent directory of a session file exists
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
