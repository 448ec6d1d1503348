use std::{env, time::Duration};

use crate::identity::ResolverConfig;

/// Configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Trending destinations cache TTL in seconds (default: 600)
    pub trending_cache_ttl_seconds: u64,
    /// Maximum number of in-memory cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    pub redis_url: String,
    /// Base URL of the identity service (default: "http://localhost:50050")
    pub identity_service_url: String,
    /// Maximum concurrent identity lookups per batch (default: 8)
    pub identity_max_concurrency: usize,
    /// Per-lookup timeout in milliseconds, 0 disables it (default: 2,000)
    pub identity_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TRENDING_CACHE_TTL_SECONDS` - Trending cache TTL in seconds (default: 600)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `IDENTITY_SERVICE_URL` - Identity service URL (default: "http://localhost:50050")
    /// - `IDENTITY_MAX_CONCURRENCY` - Concurrent identity lookups (default: 8)
    /// - `IDENTITY_TIMEOUT_MS` - Identity lookup timeout, 0 disables (default: 2,000)
    pub fn from_env() -> Self {
        Self {
            trending_cache_ttl_seconds: parsed("TRENDING_CACHE_TTL_SECONDS", 600),
            cache_max_entries: parsed("CACHE_MAX_ENTRIES", 10_000),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            identity_service_url: env::var("IDENTITY_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:50050".to_string()),
            identity_max_concurrency: parsed("IDENTITY_MAX_CONCURRENCY", 8),
            identity_timeout_ms: parsed("IDENTITY_TIMEOUT_MS", 2_000),
        }
    }

    /// Get the trending cache TTL as a Duration.
    pub fn trending_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.trending_cache_ttl_seconds)
    }

    /// Get the identity lookup timeout, if enabled.
    pub fn identity_timeout(&self) -> Option<Duration> {
        (self.identity_timeout_ms > 0).then(|| Duration::from_millis(self.identity_timeout_ms))
    }

    /// Resolver settings derived from the identity variables.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            max_concurrent_lookups: self.identity_max_concurrency,
            lookup_timeout: self.identity_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Reads `name` and parses it, falling back to `default` when unset or invalid.
fn parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            trending_cache_ttl_seconds: 600,
            cache_max_entries: 10_000,
            redis_url: "redis://localhost:6379".to_string(),
            identity_service_url: "http://localhost:50050".to_string(),
            identity_max_concurrency: 8,
            identity_timeout_ms: 2_000,
        }
    }

    #[test]
    fn test_trending_ttl_conversion() {
        assert_eq!(config().trending_cache_ttl(), Duration::from_secs(600));
    }

    #[test]
    fn test_resolver_config() {
        let resolver = config().resolver_config();

        assert_eq!(resolver.max_concurrent_lookups, 8);
        assert_eq!(resolver.lookup_timeout, Some(Duration::from_millis(2_000)));
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = Config {
            identity_timeout_ms: 0,
            ..config()
        };

        assert_eq!(config.identity_timeout(), None);
        assert_eq!(config.resolver_config().lookup_timeout, None);
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("TRENDING_CACHE_TTL_SECONDS");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("REDIS_URL");
        env::remove_var("IDENTITY_SERVICE_URL");
        env::remove_var("IDENTITY_MAX_CONCURRENCY");
        env::remove_var("IDENTITY_TIMEOUT_MS");

        let config = Config::from_env();

        assert_eq!(config.trending_cache_ttl_seconds, 600);
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.identity_service_url, "http://localhost:50050");
        assert_eq!(config.identity_max_concurrency, 8);
        assert_eq!(config.identity_timeout_ms, 2_000);
    }
}
