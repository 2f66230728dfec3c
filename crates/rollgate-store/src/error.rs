//! Error types for the artifact blob store.

use thiserror::Error;

/// Result type alias for blob store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during blob store operations.
///
/// Absent keys are not errors — `get` returns `Ok(None)` for those.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    #[error("read error for {key:?}: {source}")]
    Read {
        key: String,
        source: std::io::Error,
    },
}
