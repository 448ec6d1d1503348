mod error;
mod traits;
mod types;

pub use error::{IdentityError, ResolveError, Result};
pub use traits::IdentityService;
pub use types::{DisplayIdentity, IdentityRecord, UserId};
