use async_trait::async_trait;

use super::{IdentityError, IdentityRecord, UserId};

/// Remote identity lookup, one identifier per call.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Looks up the display fields for a single user.
    async fn lookup(&self, id: &UserId) -> Result<IdentityRecord, IdentityError>;
}
