//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `wayfare_core::storage`. Only the in-memory backend ships with
//! this crate; production deployments supply their own implementations of
//! the traits.

pub mod inmemory;

pub use inmemory::InMemoryRepository;
