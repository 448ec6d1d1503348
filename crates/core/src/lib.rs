//! Core types and pure functions for the wayfare content read path.
//!
//! This crate holds everything that does not perform I/O: content and
//! identity types, repository and cache traits, error enums, cache key
//! builders and the pure halves of enrichment. The `wayfare` crate supplies
//! the implementations.

pub mod cache;
pub mod content;
pub mod identity;
pub mod stats;
pub mod storage;
