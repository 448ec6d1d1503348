use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::broadcast::error::RecvError;

use wayfare_core::cache::{from_cache_bytes, to_cache_bytes, Cache, CacheAsideError};

use super::flight::{Claim, FlightResult, InFlight};

/// Cache-aside store with at most one in-flight computation per key.
///
/// Freshness is delegated to the backend: a key whose TTL has elapsed reads
/// as absent. A failed computation is reported to every caller that waited
/// on it and never replaced by a stale value. The previous entry, if any,
/// is left untouched so the next call can try again.
///
/// Cloning is cheap and clones share the in-flight table.
pub struct CacheAsideStore<C: Cache> {
    cache: Arc<C>,
    flights: Arc<InFlight>,
}

impl<C: Cache> Clone for CacheAsideStore<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            flights: Arc::clone(&self.flights),
        }
    }
}

impl<C: Cache> CacheAsideStore<C> {
    pub fn new(cache: Arc<C>) -> Self {
        Self {
            cache,
            flights: Arc::new(InFlight::default()),
        }
    }

    /// Returns the cached bytes for `key`, or runs `compute` and caches its output.
    ///
    /// Callers that miss while another caller is computing the same key wait
    /// for that result instead of running their own `compute`. Dropping this
    /// future while waiting detaches from the wait without affecting the
    /// computation; dropping it while computing abandons the computation and
    /// lets one of the waiters take over.
    pub async fn get_or_compute_bytes<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<Vec<u8>, CacheAsideError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, E>>,
        E: Display,
    {
        if let Some(bytes) = self.read(key).await {
            tracing::trace!(key, "Cache hit");
            return Ok(bytes);
        }

        self.fill(key, ttl, || async move {
            compute()
                .await
                .map_err(|e| CacheAsideError::ComputeFailed(e.to_string()))
        })
        .await
    }

    /// Typed variant of [`get_or_compute_bytes`](Self::get_or_compute_bytes).
    ///
    /// Values are stored as JSON. A cached payload that no longer decodes is
    /// deleted and treated as a miss.
    pub async fn get_or_compute<V, F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<V, CacheAsideError>
    where
        V: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Display,
    {
        if let Some(bytes) = self.read(key).await {
            match from_cache_bytes(&bytes) {
                Ok(value) => {
                    tracing::trace!(key, "Cache hit");
                    return Ok(value);
                }
                Err(err) => {
                    tracing::warn!(key, error = %err, "Cached payload failed to decode, dropping it");
                    self.invalidate(key).await;
                }
            }
        }

        let bytes = self
            .fill(key, ttl, || async move {
                let value = compute()
                    .await
                    .map_err(|e| CacheAsideError::ComputeFailed(e.to_string()))?;
                to_cache_bytes(&value).map_err(|e| CacheAsideError::Serialization(e.to_string()))
            })
            .await?;

        from_cache_bytes(&bytes).map_err(|e| CacheAsideError::Serialization(e.to_string()))
    }

    /// Removes `key` so the next read recomputes it.
    pub async fn invalidate(&self, key: &str) {
        if let Err(err) = self.cache.delete(key).await {
            tracing::warn!(key, error = %err, "Failed to invalidate cache key");
        }
    }

    /// Removes every key matching the glob `pattern`.
    pub async fn invalidate_pattern(&self, pattern: &str) {
        if let Err(err) = self.cache.delete_pattern(pattern).await {
            tracing::warn!(pattern, error = %err, "Failed to invalidate cache pattern");
        }
    }

    /// Number of keys currently being computed.
    pub fn in_flight(&self) -> usize {
        self.flights.len()
    }

    /// Miss path: joins the running computation for `key` or becomes its leader.
    async fn fill<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<Vec<u8>, CacheAsideError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, CacheAsideError>>,
    {
        let guard = loop {
            match self.flights.claim(key) {
                Claim::Leader(guard) => break guard,
                Claim::Follower(mut rx) => {
                    tracing::debug!(key, "Joining in-flight cache computation");
                    match rx.recv().await {
                        Ok(result) => return result.map(|bytes| bytes.to_vec()),
                        // The leader was cancelled before finishing; try to take over.
                        Err(RecvError::Closed) | Err(RecvError::Lagged(_)) => continue,
                    }
                }
            }
        };

        // A leader that finished between our miss and our claim has already
        // written the value.
        if let Some(bytes) = self.read(key).await {
            tracing::trace!(key, "Cache hit after claiming key");
            guard.complete(Ok(Arc::from(bytes.as_slice())));
            return Ok(bytes);
        }

        tracing::trace!(key, "Cache miss, computing");
        let result = compute().await;

        match &result {
            Ok(bytes) => self.write(key, bytes, ttl).await,
            Err(err) => tracing::error!(key, error = %err, "Cache computation failed"),
        }

        let shared: FlightResult = match &result {
            Ok(bytes) => Ok(Arc::from(bytes.as_slice())),
            Err(err) => Err(err.clone()),
        };
        guard.complete(shared);

        result
    }

    /// Backend read errors degrade to a miss.
    async fn read(&self, key: &str) -> Option<Vec<u8>> {
        match self.cache.get(key).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(key, error = %err, "Cache read failed, treating as miss");
                None
            }
        }
    }

    /// Backend write errors are logged; the computed value is still returned.
    async fn write(&self, key: &str, bytes: &[u8], ttl: Duration) {
        if let Err(err) = self.cache.set(key, bytes, Some(ttl)).await {
            tracing::warn!(key, error = %err, "Failed to store computed value in cache");
        }
    }
}
