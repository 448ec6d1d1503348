use thiserror::Error;

/// Errors that can occur when constructing a page request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("Invalid page: pages are numbered from 1, got {0}")]
    InvalidPage(u32),
    #[error("Invalid page size: limit must be greater than zero")]
    InvalidLimit,
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
