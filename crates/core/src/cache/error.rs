use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Errors returned by a cache-aside read.
///
/// Cloned to every caller that waited on the same computation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheAsideError {
    #[error("Cache compute failed: {0}")]
    ComputeFailed(String),
    #[error("Cache payload serialization failed: {0}")]
    Serialization(String),
}
