//! Redis cache implementation.
//!
//! TTLs are delegated to Redis (`SET EX`), so an expired key is simply
//! absent. Pattern deletes walk the keyspace with `SCAN MATCH` in batches
//! rather than `KEYS`, which would block the server.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use wayfare_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// Keys requested per `SCAN` round trip.
const SCAN_BATCH: usize = 100;

/// Redis cache backend using connection manager for pooling.
#[derive(Clone)]
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                // Redis TTLs have second granularity; never round down to "no expiry".
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut removed = 0usize;

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(map_redis_error)?;

            if !keys.is_empty() {
                conn.del::<_, ()>(&keys).await.map_err(map_redis_error)?;
                removed += keys.len();
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        tracing::debug!(pattern, removed, "Deleted cache keys by pattern");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        RedisCache::new(&redis_url()).await.ok()
    }

    /// Generate a unique test key prefix to avoid conflicts.
    fn test_prefix() -> String {
        format!("test:wayfare:{}", Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:set_get", test_prefix());
        cache.set(&key, b"hello", None).await.unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), Some(b"hello".to_vec()));

        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_get_nonexistent() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:missing", test_prefix());
        assert_eq!(cache.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:ttl", test_prefix());
        cache
            .set(&key, b"expiring", Some(Duration::from_secs(1)))
            .await
            .unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_delete_pattern() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let prefix = test_prefix();
        let trending_1 = format!("{prefix}:trending:1:10");
        let trending_2 = format!("{prefix}:trending:2:10");
        let other = format!("{prefix}:list:1:10");

        cache.set(&trending_1, b"1", None).await.unwrap();
        cache.set(&trending_2, b"2", None).await.unwrap();
        cache.set(&other, b"3", None).await.unwrap();

        cache
            .delete_pattern(&format!("{prefix}:trending:*"))
            .await
            .unwrap();

        assert!(cache.get(&trending_1).await.unwrap().is_none());
        assert!(cache.get(&trending_2).await.unwrap().is_none());
        assert!(cache.get(&other).await.unwrap().is_some());

        cache.delete(&other).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_binary_data() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:binary", test_prefix());
        let value: Vec<u8> = (0..=255).collect();

        cache.set(&key, &value, None).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(value));

        cache.delete(&key).await.unwrap();
    }
}
