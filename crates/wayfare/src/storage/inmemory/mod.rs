//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of every repository
//! trait, storing rows in collections wrapped in `Arc<RwLock<_>>`. Seed
//! helpers fill the tables, and [`FailingQuery`] makes chosen queries fail so
//! callers' error paths can be exercised.
//!
//! # Example
//!
//! ```rust,ignore
//! use wayfare::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! repo.add_story(Story::new("s1", "Porto", "Portugal", UserRef::new("u1"))).await;
//! ```

mod repository;

pub use repository::{FailingQuery, InMemoryRepository};
