use crate::ports::outbound::PackageMetadata;
use crate::shared::error::FetchError;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Result of one registry fetch, as stored in the cache
pub type FetchOutcome = std::result::Result<PackageMetadata, FetchError>;

/// FetchCache memoizes registry fetches by package name with single-flight
/// semantics: concurrent requesters of the same name await one shared
/// in-flight fetch instead of issuing duplicates.
///
/// Cloning is cheap and clones share the same entries. Successful entries
/// are never invalidated automatically; failed entries are dropped by
/// [`FetchCache::evict_failures`].
#[derive(Debug, Clone, Default)]
pub struct FetchCache {
    entries: Arc<DashMap<String, Arc<OnceCell<FetchOutcome>>>>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached outcome for `name`, running `fetch` only if no
    /// outcome is cached and no fetch for `name` is already in flight.
    pub async fn get_or_fetch<F, Fut>(&self, name: &str, fetch: F) -> FetchOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchOutcome>,
    {
        // Clone the cell out so no map guard is held across the await
        let cell = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        if let Some(outcome) = cell.get() {
            debug!(package = name, "fetch cache hit");
            return outcome.clone();
        }

        cell.get_or_init(fetch).await.clone()
    }

    /// Successfully fetched metadata for `name`, if cached
    pub fn get(&self, name: &str) -> Option<PackageMetadata> {
        self.entries
            .get(name)
            .and_then(|cell| cell.get().and_then(|outcome| outcome.as_ref().ok().cloned()))
    }

    /// True if an outcome (success or failure) is cached for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .map(|cell| cell.initialized())
            .unwrap_or(false)
    }

    /// Number of successfully cached packages
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.value().get(), Some(Ok(_))))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops cached failures so the next fetch of those names retries.
    /// In-flight fetches and successful entries are kept.
    pub fn evict_failures(&self) {
        self.entries
            .retain(|_, cell| !matches!(cell.get(), Some(Err(_))));
    }
}
