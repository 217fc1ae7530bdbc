use super::fetch_cache::FetchCache;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Mutable state carried across resolver calls.
///
/// Holds the visited set and the fetch cache explicitly so the statefulness
/// of repeated analyses is visible at every call site:
/// - a name is marked visited the instant its resolution starts, before the
///   fetch outcome is known, and stays visited until [`reset`](Self::reset);
/// - analyzing a second root on an unreset context skips every name already
///   visited by earlier analyses, so those names are absent from the new tree;
/// - the fetch cache outlives `reset` so overlapping analyses reuse fetches.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    visited: HashSet<String>,
    cache: FetchCache,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `name` visited. Returns `false` if it already was.
    pub fn mark_visited(&mut self, name: &str) -> bool {
        self.visited.insert(name.to_string())
    }

    pub fn is_visited(&self, name: &str) -> bool {
        self.visited.contains(name)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    /// Clears the visited set. Cached metadata is kept; cached failures are
    /// evicted so previously failed packages are retried on the next walk.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.cache.evict_failures();
    }
}

/// Cooperative cancellation signal for a whole analysis
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
