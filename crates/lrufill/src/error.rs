//! Error types for lrufill

use thiserror::Error;

/// Result type alias for lrufill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the cache itself.
///
/// Failures of the value source are not represented here: they are returned
/// to the caller of [`LruCache::get`](crate::LruCache::get) as the source's
/// own error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Capacity must hold at least one entry
    #[error("invalid cache capacity {0}: capacity must be greater than 0")]
    InvalidCapacity(usize),

    /// Index and recency list disagree
    #[error("cache invariant violated: {0}")]
    Invariant(String),
}

impl Error {
    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        Error::Invariant(msg.into())
    }
}
