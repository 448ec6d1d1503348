//! Read-side enrichment and cache-aside layer for travel content.
//!
//! Content is read from storage with bare user ids, enriched with display
//! identities from the identity service in one batched resolution per
//! request, and, for expensive aggregates, served from a TTL cache that
//! recomputes at most once per key at a time.
//!
//! Domain types and the collaborator traits live in `wayfare_core`.

pub mod cache;
pub mod cache_aside;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod identity;
pub mod services;
pub mod state;
pub mod stats;
pub mod storage;

pub use cache_aside::CacheAsideStore;
pub use config::Config;
pub use enrichment::EnrichmentCoordinator;
pub use error::{Result, ServiceError};
pub use identity::{HttpIdentityService, IdentityResolver, ResolverConfig};
pub use state::{ReadServices, Repositories};
pub use stats::StatisticsAggregator;
