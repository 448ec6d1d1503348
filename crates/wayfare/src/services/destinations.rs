use std::sync::Arc;
use std::time::Duration;

use wayfare_core::cache::{trending_destinations_key, trending_destinations_pattern, Cache};
use wayfare_core::content::{Destination, TrendingDestinations};
use wayfare_core::storage::{DestinationRepository, Page, PageRequest};

use crate::cache_aside::CacheAsideStore;
use crate::error::{Result, ServiceError};

/// The destination catalogue, with trending rankings served cache-aside.
pub struct DestinationService<C: Cache> {
    destinations: Arc<dyn DestinationRepository>,
    cache: CacheAsideStore<C>,
    trending_ttl: Duration,
}

impl<C: Cache> Clone for DestinationService<C> {
    fn clone(&self) -> Self {
        Self {
            destinations: Arc::clone(&self.destinations),
            cache: self.cache.clone(),
            trending_ttl: self.trending_ttl,
        }
    }
}

impl<C: Cache> DestinationService<C> {
    pub fn new(
        destinations: Arc<dyn DestinationRepository>,
        cache: CacheAsideStore<C>,
        trending_ttl: Duration,
    ) -> Self {
        Self {
            destinations,
            cache,
            trending_ttl,
        }
    }

    /// Lists destinations, optionally filtered by exact name.
    pub async fn list_destinations(
        &self,
        query: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Destination>> {
        Ok(self.destinations.list_destinations(query, page).await?)
    }

    pub async fn get_destination(&self, id: &str) -> Result<Destination> {
        self.destinations
            .get_destination(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Destination", id))
    }

    /// Trending destinations for one page. Each page is cached under its own
    /// key for the configured TTL; concurrent misses share one query.
    pub async fn trending_destinations(&self, page: PageRequest) -> Result<TrendingDestinations> {
        let key = trending_destinations_key(page);
        let destinations = Arc::clone(&self.destinations);

        let trending = self
            .cache
            .get_or_compute(&key, self.trending_ttl, || async move {
                destinations.trending_destinations(page).await
            })
            .await?;

        Ok(trending)
    }

    /// Drops every cached trending page.
    pub async fn invalidate_trending(&self) {
        self.cache
            .invalidate_pattern(&trending_destinations_pattern())
            .await;
    }
}
