use thiserror::Error;

use crate::identity::ResolveError;

/// Errors that can occur while enriching a batch of content.
///
/// Enrichment is all-or-nothing: when this is returned, no items are.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnrichmentError {
    #[error("Enrichment failed: {0}")]
    EnrichmentFailed(#[from] ResolveError),
}
