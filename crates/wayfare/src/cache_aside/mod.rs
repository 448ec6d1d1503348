//! Cache-aside reads with single-flight recomputation.
//!
//! [`CacheAsideStore`] consults a [`Cache`](wayfare_core::cache::Cache)
//! first and only runs the supplied computation on a miss. Concurrent misses
//! for the same key share one computation: the first caller computes, the
//! rest wait for its result (or its error).
//!
//! # Example
//!
//! ```ignore
//! let store = CacheAsideStore::new(Arc::new(MemoryCache::new(10_000)));
//!
//! let trending = store
//!     .get_or_compute(&key, Duration::from_secs(600), || repo.trending_destinations(page))
//!     .await?;
//! ```

mod flight;
mod store;

pub use store::CacheAsideStore;
