//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur during cache operations.
///
/// Reads never surface these to callers of [`CacheStore::read`](crate::CacheStore::read);
/// they become cache misses. Writes return them so the caller can log and
/// carry on.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading or writing a cache file.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A cache file could not be encoded or decoded as JSON.
    #[error("malformed cache file {path}: {reason}")]
    Serialization {
        /// The cache file path.
        path: PathBuf,
        /// Description of the serialization failure.
        reason: String,
    },
}
