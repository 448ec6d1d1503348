//! Errors surfaced by the read services.

use thiserror::Error;

use wayfare_core::cache::CacheAsideError;
use wayfare_core::content::EnrichmentError;
use wayfare_core::stats::AggregationError;
use wayfare_core::storage::{PageRequestError, RepositoryError};

/// Error returned by every read service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error(transparent)]
    InvalidPage(#[from] PageRequestError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),

    #[error(transparent)]
    Cache(#[from] CacheAsideError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

impl ServiceError {
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Returns true if the error means the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::NotFound { .. } | ServiceError::Repository(RepositoryError::NotFound { .. })
        )
    }
}

/// Result type for the read services.
pub type Result<T> = std::result::Result<T, ServiceError>;
