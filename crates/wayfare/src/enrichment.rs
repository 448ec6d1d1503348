//! Batch enrichment of content items with display identities.

use wayfare_core::content::{apply_identities, collect_identifiers, EnrichmentError, IdentityRefs};
use wayfare_core::identity::ResolveError;

use crate::identity::IdentityResolver;

/// Attaches display identities to a batch of content items.
///
/// One resolver call per batch, whatever the batch size. Fails closed: on
/// error no item is returned.
#[derive(Clone)]
pub struct EnrichmentCoordinator {
    resolver: IdentityResolver,
}

impl EnrichmentCoordinator {
    pub fn new(resolver: IdentityResolver) -> Self {
        Self { resolver }
    }

    /// Enriches every user reference of every item, preserving order.
    pub async fn enrich<T: IdentityRefs>(&self, mut items: Vec<T>) -> Result<Vec<T>, EnrichmentError> {
        let ids = collect_identifiers(&items);
        if ids.is_empty() {
            return Ok(items);
        }

        tracing::debug!(items = items.len(), identities = ids.len(), "Enriching batch");

        let identities = self.resolver.resolve(&ids).await.map_err(|e| {
            tracing::error!(error = %e, items = items.len(), "Enrichment failed");
            EnrichmentError::from(e)
        })?;

        apply_identities(&mut items, &identities).map_err(|failed| {
            tracing::error!(missing = failed.len(), "Resolver answer is missing identities");
            EnrichmentError::from(ResolveError::PartialResolutionFailure { failed })
        })?;

        Ok(items)
    }

    /// Enriches a single item.
    pub async fn enrich_one<T: IdentityRefs>(&self, item: T) -> Result<T, EnrichmentError> {
        let mut enriched = self.enrich(vec![item]).await?;
        // `enrich` preserves the item count.
        Ok(enriched.remove(0))
    }
}
