//! Redis cache backend implementation.
//!
//! Provides a distributed cache using Redis for multi-instance deployments,
//! so every instance shares one trending-destinations computation per TTL.

mod cache;
mod error;

pub use cache::RedisCache;
