//! In-memory cache implementation with LRU eviction.
//!
//! Entries carry the instant they were stored and their TTL. Freshness is
//! checked on read, so an expired entry is invisible even before the LRU
//! evicts it. Time comes from `tokio::time`, which lets tests pause and
//! advance the clock.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;
use tokio::time::Instant;

use wayfare_core::cache::{pattern_matches, Cache, Result};

/// A single cache entry.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    stored_at: Instant,
    ttl: Option<Duration>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
            ttl,
        }
    }

    /// An entry is fresh iff `now < stored_at + ttl`. No TTL means no expiry.
    fn is_fresh(&self, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now < self.stored_at + ttl,
            None => true,
        }
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Cloning is cheap and clones share the same store.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<Mutex<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` values.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Number of entries held, fresh or stale.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.lock().await;

        // Stale entries stay in place until overwritten or evicted.
        match store.get(key) {
            Some(entry) if entry.is_fresh(Instant::now()) => Ok(Some(entry.value.clone())),
            _ => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.lock().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.lock().await;
        store.pop(key);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let mut store = self.store.lock().await;
        let matching: Vec<String> = store
            .iter()
            .filter(|(key, _)| pattern_matches(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &matching {
            store.pop(key);
        }

        tracing::debug!(pattern, removed = matching.len(), "Deleted cache keys by pattern");
        Ok(())
    }
}
