use serde::{Deserialize, Serialize};

use crate::identity::{DisplayIdentity, UserId};

/// An author, sender or recipient reference embedded in a content item.
///
/// Storage fills in `id`; enrichment fills in `identity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<DisplayIdentity>,
}

impl UserRef {
    /// Creates an unresolved reference.
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            identity: None,
        }
    }

    /// Returns true if a display identity for this exact id is attached.
    pub fn is_resolved(&self) -> bool {
        self.identity.as_ref().is_some_and(|i| i.id == self.id)
    }

    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.username.as_str())
    }

    pub fn full_name(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.full_name.as_str())
    }
}

/// Access to the user references a content item declares.
///
/// An item is enriched iff every reference it returns is resolved.
pub trait IdentityRefs {
    fn user_refs(&self) -> Vec<&UserRef>;

    fn user_refs_mut(&mut self) -> Vec<&mut UserRef>;

    fn is_enriched(&self) -> bool {
        self.user_refs().iter().all(|r| r.is_resolved())
    }
}
