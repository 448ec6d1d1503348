//! Identity resolution against the remote identity service.

mod http;
mod resolver;

#[cfg(test)]
pub(crate) use resolver::tests;

pub use http::HttpIdentityService;
pub use resolver::{IdentityResolver, ResolverConfig};
