use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};

use wayfare_core::identity::{
    DisplayIdentity, IdentityError, IdentityRecord, IdentityService, ResolveError, Result,
    UserId,
};

/// Default bound on concurrent lookups.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 8;

/// Tuning for [`IdentityResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Maximum number of lookups in flight at once. Zero is treated as one.
    pub max_concurrent_lookups: usize,
    /// Per-lookup deadline. A lookup that exceeds it counts as unavailable.
    pub lookup_timeout: Option<Duration>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
            lookup_timeout: None,
        }
    }
}

/// Resolves batches of identifiers to display identities.
///
/// Holds no state across calls. Every [`resolve`](Self::resolve) goes to the
/// identity service.
#[derive(Clone)]
pub struct IdentityResolver {
    service: Arc<dyn IdentityService>,
    config: ResolverConfig,
}

impl IdentityResolver {
    pub fn new(service: Arc<dyn IdentityService>, config: ResolverConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Looks up every distinct id once, with bounded concurrency.
    ///
    /// Succeeds only when every id resolves. Dropping the returned future
    /// cancels the lookups still in flight.
    pub async fn resolve<'a, I>(&self, ids: I) -> Result<HashMap<UserId, DisplayIdentity>>
    where
        I: IntoIterator<Item = &'a UserId>,
    {
        let unique: BTreeSet<&UserId> = ids.into_iter().collect();
        if unique.is_empty() {
            return Ok(HashMap::new());
        }

        let requested = unique.len();
        tracing::debug!(
            requested,
            max_concurrent = self.config.max_concurrent_lookups,
            "Resolving identities"
        );

        let outcomes: Vec<(UserId, std::result::Result<DisplayIdentity, IdentityError>)> =
            stream::iter(unique)
                .map(move |id| async move {
                    let outcome = self
                        .lookup(id)
                        .await
                        .map(|record| DisplayIdentity::from_record(id.clone(), record));
                    (id.clone(), outcome)
                })
                .buffer_unordered(self.config.max_concurrent_lookups.max(1))
                .collect()
                .await;

        let mut resolved = HashMap::with_capacity(requested);
        let mut failed = Vec::new();
        let mut unavailable = None;

        for (id, outcome) in outcomes {
            match outcome {
                Ok(identity) => {
                    resolved.insert(id, identity);
                }
                Err(IdentityError::NotFound(_)) => failed.push(id),
                Err(IdentityError::Unavailable(reason)) => {
                    unavailable.get_or_insert(reason);
                    failed.push(id);
                }
            }
        }

        if failed.is_empty() {
            return Ok(resolved);
        }

        failed.sort();
        tracing::error!(
            requested,
            failed = failed.len(),
            "Identity resolution failed"
        );

        match unavailable {
            Some(reason) if resolved.is_empty() => Err(ResolveError::UpstreamUnavailable(reason)),
            _ => Err(ResolveError::PartialResolutionFailure { failed }),
        }
    }

    async fn lookup(
        &self,
        id: &UserId,
    ) -> std::result::Result<IdentityRecord, IdentityError> {
        match self.config.lookup_timeout {
            Some(limit) => tokio::time::timeout(limit, self.service.lookup(id))
                .await
                .unwrap_or_else(|_| {
                    Err(IdentityError::Unavailable(format!(
                        "lookup of {id} timed out after {}ms",
                        limit.as_millis()
                    )))
                }),
            None => self.service.lookup(id).await,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Identity service backed by a fixed table, counting its lookups.
    #[derive(Default)]
    pub(crate) struct StubIdentityService {
        known: HashMap<UserId, IdentityRecord>,
        unavailable: BTreeSet<UserId>,
        delay: Option<Duration>,
        calls: AtomicUsize,
        completed: AtomicUsize,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
        looked_up: Mutex<Vec<UserId>>,
    }

    impl StubIdentityService {
        pub(crate) fn with_users(ids: &[&str]) -> Self {
            let known = ids
                .iter()
                .map(|id| {
                    (
                        UserId::from(*id),
                        IdentityRecord {
                            username: format!("{id}_name"),
                            full_name: format!("{id} Full"),
                        },
                    )
                })
                .collect();
            Self {
                known,
                ..Self::default()
            }
        }

        pub(crate) fn unavailable_for(mut self, ids: &[&str]) -> Self {
            self.unavailable = ids.iter().map(|id| UserId::from(*id)).collect();
            self
        }

        pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Lookups that ran past their delay, as opposed to ones merely started.
        pub(crate) fn completed(&self) -> usize {
            self.completed.load(Ordering::SeqCst)
        }

        pub(crate) fn peak_in_flight(&self) -> usize {
            self.peak_in_flight.load(Ordering::SeqCst)
        }

        pub(crate) fn looked_up(&self) -> Vec<UserId> {
            let mut ids = self.looked_up.lock().unwrap().clone();
            ids.sort();
            ids
        }
    }

    #[async_trait]
    impl IdentityService for StubIdentityService {
        async fn lookup(
            &self,
            id: &UserId,
        ) -> std::result::Result<IdentityRecord, IdentityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.looked_up.lock().unwrap().push(id.clone());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.completed.fetch_add(1, Ordering::SeqCst);

            if self.unavailable.contains(id) {
                return Err(IdentityError::Unavailable("connection refused".to_string()));
            }
            self.known
                .get(id)
                .cloned()
                .ok_or_else(|| IdentityError::NotFound(id.clone()))
        }
    }

    fn ids(raw: &[&str]) -> Vec<UserId> {
        raw.iter().map(|id| UserId::from(*id)).collect()
    }

    fn resolver(service: &Arc<StubIdentityService>) -> IdentityResolver {
        IdentityResolver::new(service.clone(), ResolverConfig::default())
    }

    #[tokio::test]
    async fn test_resolves_all_ids() {
        let service = Arc::new(StubIdentityService::with_users(&["u1", "u2"]));

        let resolved = resolver(&service).resolve(&ids(&["u1", "u2"])).await.unwrap();

        assert_eq!(resolved.len(), 2);
        let u1 = &resolved[&UserId::from("u1")];
        assert_eq!(u1.id, UserId::from("u1"));
        assert_eq!(u1.username, "u1_name");
        assert_eq!(u1.full_name, "u1 Full");
    }

    #[tokio::test]
    async fn test_duplicates_are_looked_up_once() {
        let service = Arc::new(StubIdentityService::with_users(&["A", "B", "C"]));
        let mut batch = Vec::new();
        for i in 0..50 {
            batch.push(UserId::from(["A", "B", "C"][i % 3]));
        }

        let resolved = resolver(&service).resolve(&batch).await.unwrap();

        assert_eq!(resolved.len(), 3);
        assert_eq!(service.calls(), 3);
        assert_eq!(service.looked_up(), ids(&["A", "B", "C"]));
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let service = Arc::new(StubIdentityService::with_users(&["u1"]));

        let resolved = resolver(&service).resolve(&Vec::new()).await.unwrap();

        assert!(resolved.is_empty());
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_partial_failure_lists_failed_ids() {
        let service = Arc::new(StubIdentityService::with_users(&["u1", "u2"]));

        let result = resolver(&service).resolve(&ids(&["u3", "u1", "u2"])).await;

        assert_eq!(
            result,
            Err(ResolveError::PartialResolutionFailure {
                failed: ids(&["u3"])
            })
        );
    }

    #[tokio::test]
    async fn test_partial_failure_when_some_are_unavailable() {
        let service =
            Arc::new(StubIdentityService::with_users(&["u1", "u2"]).unavailable_for(&["u2"]));

        let result = resolver(&service).resolve(&ids(&["u1", "u2"])).await;

        assert_eq!(
            result,
            Err(ResolveError::PartialResolutionFailure {
                failed: ids(&["u2"])
            })
        );
    }

    #[tokio::test]
    async fn test_all_unavailable_is_upstream_unavailable() {
        let service = Arc::new(StubIdentityService::default().unavailable_for(&["u1", "u2"]));

        let result = resolver(&service).resolve(&ids(&["u1", "u2"])).await;

        assert_eq!(
            result,
            Err(ResolveError::UpstreamUnavailable(
                "connection refused".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_all_not_found_is_partial_failure() {
        let service = Arc::new(StubIdentityService::default());

        let result = resolver(&service).resolve(&ids(&["b", "a"])).await;

        assert_eq!(
            result,
            Err(ResolveError::PartialResolutionFailure {
                failed: ids(&["a", "b"])
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fan_out_is_bounded() {
        let names: Vec<String> = (0..20).map(|i| format!("u{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let service = Arc::new(
            StubIdentityService::with_users(&refs).with_delay(Duration::from_millis(50)),
        );
        let resolver = IdentityResolver::new(
            service.clone(),
            ResolverConfig {
                max_concurrent_lookups: 4,
                lookup_timeout: None,
            },
        );

        let resolved = resolver.resolve(&ids(&refs)).await.unwrap();

        assert_eq!(resolved.len(), 20);
        assert_eq!(service.peak_in_flight(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_lookup_times_out_as_unavailable() {
        let service = Arc::new(
            StubIdentityService::with_users(&["u1"]).with_delay(Duration::from_secs(5)),
        );
        let resolver = IdentityResolver::new(
            service.clone(),
            ResolverConfig {
                max_concurrent_lookups: 8,
                lookup_timeout: Some(Duration::from_millis(100)),
            },
        );

        let result = resolver.resolve(&ids(&["u1"])).await;

        assert!(matches!(result, Err(ResolveError::UpstreamUnavailable(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_resolve_cancels_lookups() {
        let service = Arc::new(
            StubIdentityService::with_users(&["u1", "u2", "u3"])
                .with_delay(Duration::from_secs(5)),
        );
        let resolver = resolver(&service);
        let batch = ids(&["u1", "u2", "u3"]);

        let result =
            tokio::time::timeout(Duration::from_millis(100), resolver.resolve(&batch)).await;
        assert!(result.is_err());

        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;

        assert_eq!(service.calls(), 3);
        assert_eq!(service.completed(), 0);
    }

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.max_concurrent_lookups, 8);
        assert_eq!(config.lookup_timeout, None);
    }
}
