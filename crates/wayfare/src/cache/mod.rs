//! Cache backend implementations.
//!
//! This module provides concrete implementations of the
//! `wayfare_core::cache::Cache` trait.
//!
//! # Feature Flags
//!
//! - (always): In-memory LRU cache using tokio synchronization primitives
//! - `redis`: Redis cache using the redis crate, for multi-instance deployments

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
