//! Wiring of the read services.
//!
//! [`ReadServices`] is built once at startup and cloned into every request
//! handler. The repositories are trait objects, so any storage backend that
//! implements the `wayfare_core::storage` traits can be plugged in.

use std::sync::Arc;

use wayfare_core::cache::Cache;
use wayfare_core::identity::IdentityService;
use wayfare_core::storage::{
    CommunicationRepository, DestinationRepository, ItineraryRepository, StoryRepository,
};

use crate::cache::MemoryCache;
use crate::cache_aside::CacheAsideStore;
use crate::config::Config;
use crate::enrichment::EnrichmentCoordinator;
use crate::identity::{HttpIdentityService, IdentityResolver};
use crate::services::{CommunicationService, DestinationService, ItineraryService, StoryService};
use crate::stats::StatisticsAggregator;

/// The storage collaborators of the read services.
#[derive(Clone)]
pub struct Repositories {
    pub stories: Arc<dyn StoryRepository>,
    pub itineraries: Arc<dyn ItineraryRepository>,
    pub communication: Arc<dyn CommunicationRepository>,
    pub destinations: Arc<dyn DestinationRepository>,
}

impl Repositories {
    /// Uses one backend for every repository.
    pub fn shared<R>(repo: Arc<R>) -> Self
    where
        R: StoryRepository
            + ItineraryRepository
            + CommunicationRepository
            + DestinationRepository
            + 'static,
    {
        Self {
            stories: repo.clone(),
            itineraries: repo.clone(),
            communication: repo.clone(),
            destinations: repo,
        }
    }
}

/// Every read service, sharing one resolver and one cache.
pub struct ReadServices<C: Cache> {
    pub stories: StoryService,
    pub itineraries: ItineraryService,
    pub communication: CommunicationService,
    pub destinations: DestinationService<C>,
}

impl<C: Cache> Clone for ReadServices<C> {
    fn clone(&self) -> Self {
        Self {
            stories: self.stories.clone(),
            itineraries: self.itineraries.clone(),
            communication: self.communication.clone(),
            destinations: self.destinations.clone(),
        }
    }
}

impl<C: Cache> ReadServices<C> {
    /// Builds the services over the given collaborators.
    pub fn build(
        repos: Repositories,
        identity: Arc<dyn IdentityService>,
        cache: Arc<C>,
        config: &Config,
    ) -> Self {
        let resolver = IdentityResolver::new(identity, config.resolver_config());
        let enrichment = EnrichmentCoordinator::new(resolver);
        let statistics =
            StatisticsAggregator::new(repos.stories.clone(), repos.itineraries.clone());

        Self {
            stories: StoryService::new(repos.stories, enrichment.clone()),
            itineraries: ItineraryService::new(repos.itineraries, enrichment.clone()),
            communication: CommunicationService::new(repos.communication, enrichment, statistics),
            destinations: DestinationService::new(
                repos.destinations,
                CacheAsideStore::new(cache),
                config.trending_cache_ttl(),
            ),
        }
    }
}

impl ReadServices<MemoryCache> {
    /// Builds the services with the HTTP identity service and a per-process cache.
    pub fn with_memory_cache(repos: Repositories, config: &Config) -> Self {
        tracing::info!(
            identity_service = %config.identity_service_url,
            cache_max_entries = config.cache_max_entries,
            "Using in-memory cache"
        );
        let identity = Arc::new(HttpIdentityService::new(&config.identity_service_url));
        let cache = Arc::new(MemoryCache::new(config.cache_max_entries.max(1)));
        Self::build(repos, identity, cache, config)
    }
}

#[cfg(feature = "redis")]
impl ReadServices<crate::cache::RedisCache> {
    /// Builds the services with the HTTP identity service and a Redis cache
    /// shared across instances.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if Redis cannot be reached.
    pub async fn with_redis_cache(
        repos: Repositories,
        config: &Config,
    ) -> wayfare_core::cache::Result<Self> {
        tracing::info!(
            identity_service = %config.identity_service_url,
            redis_url = %config.redis_url,
            "Using Redis cache"
        );
        let identity = Arc::new(HttpIdentityService::new(&config.identity_service_url));
        let cache = Arc::new(crate::cache::RedisCache::new(&config.redis_url).await?);
        Ok(Self::build(repos, identity, cache, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wayfare_core::content::{Destination, Story, UserRef};
    use wayfare_core::storage::PageRequest;

    use crate::identity::tests::StubIdentityService;
    use crate::storage::InMemoryRepository;

    fn config() -> Config {
        Config {
            trending_cache_ttl_seconds: 600,
            cache_max_entries: 100,
            redis_url: "redis://localhost:6379".to_string(),
            identity_service_url: "http://localhost:50050".to_string(),
            identity_max_concurrency: 4,
            identity_timeout_ms: 0,
        }
    }

    #[tokio::test]
    async fn test_services_share_backend() {
        let repo = InMemoryRepository::new();
        repo.add_story(Story::new("s1", "Seoul", "Korea", UserRef::new("u1")))
            .await;
        repo.add_destination(Destination::new("d1", "Seoul", "Korea"))
            .await;
        repo.add_destination_activity("d1", 1).await;

        let services = ReadServices::build(
            Repositories::shared(Arc::new(repo.clone())),
            Arc::new(StubIdentityService::with_users(&["u1"])),
            Arc::new(MemoryCache::new(100)),
            &config(),
        );

        let stories = services
            .stories
            .list_stories(PageRequest::default())
            .await
            .unwrap();
        let trending = services
            .destinations
            .trending_destinations(PageRequest::default())
            .await
            .unwrap();
        let stats = services
            .communication
            .user_statistics(&"u1".into())
            .await
            .unwrap();

        assert_eq!(stories.items[0].author.username(), Some("u1_name"));
        assert_eq!(trending.total, 1);
        assert_eq!(stats.total_stories, 1);
    }
}
