use thiserror::Error;

use super::UserId;

/// Errors returned by a single identity lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity not found: {0}")]
    NotFound(UserId),
    #[error("Identity service unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned when resolving a batch of identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Identity service unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Failed to resolve {} identities: {}", .failed.len(), join_ids(.failed))]
    PartialResolutionFailure { failed: Vec<UserId> },
}

/// Result type for batch resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;

fn join_ids(ids: &[UserId]) -> String {
    ids.iter()
        .map(UserId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = IdentityError::NotFound(UserId::from("u-9"));
        assert_eq!(error.to_string(), "Identity not found: u-9");
    }

    #[test]
    fn test_upstream_unavailable_display() {
        let error = ResolveError::UpstreamUnavailable("connection refused".to_string());
        assert_eq!(
            error.to_string(),
            "Identity service unavailable: connection refused"
        );
    }

    #[test]
    fn test_partial_failure_lists_ids() {
        let error = ResolveError::PartialResolutionFailure {
            failed: vec![UserId::from("a"), UserId::from("c")],
        };
        assert_eq!(error.to_string(), "Failed to resolve 2 identities: a, c");
    }
}
