mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheAsideError, CacheError, Result};
pub use keys::{trending_destinations_key, trending_destinations_pattern, TRENDING_PREFIX};
pub use patterns::pattern_matches;
pub use serialization::{from_cache_bytes, to_cache_bytes, SerializationError};
pub use traits::Cache;
