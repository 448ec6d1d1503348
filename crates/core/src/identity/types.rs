use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque key of an identity record owned by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Fields returned by the identity service for a single lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub username: String,
    pub full_name: String,
}

/// Human-readable identity attached to a content reference.
///
/// Only produced by resolution, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayIdentity {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
}

impl DisplayIdentity {
    /// Builds the display identity for `id` from a service record.
    pub fn from_record(id: UserId, record: IdentityRecord) -> Self {
        Self {
            id,
            username: record.username,
            full_name: record.full_name,
        }
    }
}
