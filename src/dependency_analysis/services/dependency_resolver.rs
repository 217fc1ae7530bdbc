use super::fetch_cache::{FetchCache, FetchOutcome};
use super::requirement_parser::RequirementParser;
use super::resolution_context::{CancellationFlag, ResolutionContext};
use super::risk_aggregator::{complete_supply_chain, RiskScorer};
use crate::dependency_analysis::domain::{
    DependencyNode, DependencyTree, OmittedPackage, RiskAssessment,
};
use crate::ports::outbound::RegistryClient;
use crate::shared::error::FetchError;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default per-fetch timeout
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Resolver tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Upper bound for one registry fetch; a slower fetch counts as failed
    pub fetch_timeout: Duration,
    /// Maximum sibling fetches in flight at once. `1` keeps the walk fully
    /// sequential.
    pub concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            concurrency: 1,
        }
    }
}

/// Result of one `analyze` call
#[derive(Debug, Clone)]
pub struct ResolutionOutcome {
    pub tree: DependencyTree,
    /// Packages that were visited but could not be fetched
    pub omitted: Vec<OmittedPackage>,
    /// Full risk assessment per materialized node
    pub assessments: BTreeMap<String, RiskAssessment>,
    /// The walk was stopped by the cancellation flag
    pub cancelled: bool,
}

impl ResolutionOutcome {
    /// True when the tree may be missing packages that were requested
    pub fn is_partial(&self) -> bool {
        self.cancelled || !self.omitted.is_empty()
    }
}

/// Called after each node is inserted with the running node count and the
/// package name
pub type ProgressCallback<'a> = &'a (dyn Fn(usize, &str) + Send + Sync);

/// Per-call walk state
struct Walk<'c> {
    ctx: &'c mut ResolutionContext,
    on_resolved: ProgressCallback<'c>,
    tree: DependencyTree,
    omitted: Vec<OmittedPackage>,
    assessments: BTreeMap<String, RiskAssessment>,
    max_depth: usize,
    cancelled: bool,
}

/// DependencyResolver builds a [`DependencyTree`] by walking the registry
/// depth-first from a root package.
///
/// Levels are discovery levels: fixed when a package is first reached in
/// pre-order and never revised. Fetch failures never abort the walk; the
/// package is omitted, stays visited, and its reason is reported in
/// [`ResolutionOutcome::omitted`].
pub struct DependencyResolver<R, S> {
    registry: R,
    scorer: S,
    config: ResolverConfig,
    cancellation: CancellationFlag,
}

impl<R, S> DependencyResolver<R, S>
where
    R: RegistryClient,
    S: RiskScorer,
{
    pub fn new(registry: R, scorer: S, config: ResolverConfig) -> Self {
        Self {
            registry,
            scorer,
            config,
            cancellation: CancellationFlag::new(),
        }
    }

    /// Handle that cancels any walk running on this resolver
    pub fn cancellation(&self) -> CancellationFlag {
        self.cancellation.clone()
    }

    /// Resolves the dependency tree of `root` down to `max_depth`.
    ///
    /// The walk is depth-first pre-order. For every dependency discovered,
    /// the edge is appended before recursing, whether or not the dependency
    /// ends up depth-cut, already visited or failed, so edges may dangle.
    /// Names visited by earlier calls on the same `ctx` are skipped until
    /// [`ResolutionContext::reset`] is called.
    pub async fn analyze(
        &self,
        ctx: &mut ResolutionContext,
        root: &str,
        max_depth: usize,
    ) -> ResolutionOutcome {
        self.analyze_with_progress(ctx, root, max_depth, &|_, _| {})
            .await
    }

    /// Same as [`analyze`](Self::analyze), reporting every resolved node
    /// through `on_resolved`
    pub async fn analyze_with_progress(
        &self,
        ctx: &mut ResolutionContext,
        root: &str,
        max_depth: usize,
        on_resolved: ProgressCallback<'_>,
    ) -> ResolutionOutcome {
        let mut walk = Walk {
            ctx,
            on_resolved,
            tree: DependencyTree::new(root),
            omitted: Vec::new(),
            assessments: BTreeMap::new(),
            max_depth,
            cancelled: false,
        };

        self.visit(&mut walk, root.to_string(), 0).await;

        let Walk {
            tree,
            omitted,
            mut assessments,
            cancelled,
            ..
        } = walk;

        complete_supply_chain(&tree, &mut assessments);

        info!(
            root,
            max_depth,
            nodes = tree.node_count(),
            edges = tree.edges().len(),
            omitted = omitted.len(),
            cancelled,
            "dependency resolution finished"
        );

        ResolutionOutcome {
            tree,
            omitted,
            assessments,
            cancelled,
        }
    }

    fn visit<'w, 'c: 'w>(
        &'w self,
        walk: &'w mut Walk<'c>,
        name: String,
        level: usize,
    ) -> BoxFuture<'w, ()> {
        async move {
            if level > walk.max_depth || walk.ctx.is_visited(&name) {
                return;
            }
            if self.cancellation.is_cancelled() {
                walk.cancelled = true;
                return;
            }

            // Marked before the fetch: a failed package stays visited
            walk.ctx.mark_visited(&name);

            let metadata = match self.fetch(walk.ctx.cache(), &name).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(package = %name, level, error = %e, "omitting package");
                    walk.omitted.push(OmittedPackage {
                        name: name.clone(),
                        reason: e.to_string(),
                        kind: e.kind().to_string(),
                    });
                    return;
                }
            };

            let dependency_names = RequirementParser::parse(&metadata.dependency_specifiers);
            let assessment = self
                .scorer
                .score(&metadata, dependency_names.len(), level)
                .await;

            walk.tree.insert_node(DependencyNode {
                name: name.clone(),
                version: metadata.version.clone(),
                level,
                dependency_names: dependency_names.clone(),
                has_cve: assessment.has_cve(),
                risk_score: assessment.risk_score,
                license: metadata.license.clone(),
            });
            walk.assessments.insert(name.clone(), assessment);
            (walk.on_resolved)(walk.tree.node_count(), &name);

            if self.config.concurrency > 1 && level < walk.max_depth {
                self.prefetch(walk, &dependency_names).await;
            }

            for dependency in dependency_names {
                if walk.cancelled {
                    break;
                }
                walk.tree.push_edge(name.clone(), dependency.clone());
                self.visit(walk, dependency, level + 1).await;
            }
        }
        .boxed()
    }

    /// Warms the fetch cache with the not-yet-visited children of a node,
    /// up to `concurrency` fetches at a time. The walk itself stays
    /// sequential, so node set, levels and edge order are unchanged.
    async fn prefetch(&self, walk: &Walk<'_>, names: &[String]) {
        let cache = walk.ctx.cache();
        let pending: Vec<String> = names
            .iter()
            .filter(|n| !walk.ctx.is_visited(n) && !cache.contains(n))
            .cloned()
            .collect();

        if pending.len() < 2 {
            return;
        }

        debug!(count = pending.len(), "prefetching sibling packages");
        stream::iter(pending)
            .map(|name| async move { self.fetch(cache, &name).await })
            .buffer_unordered(self.config.concurrency)
            .for_each(|_| async {})
            .await;
    }

    async fn fetch(&self, cache: &FetchCache, name: &str) -> FetchOutcome {
        let timeout = self.config.fetch_timeout;
        cache
            .get_or_fetch(name, move || async move {
                debug!(package = name, "fetching package metadata");
                match tokio::time::timeout(timeout, self.registry.fetch(name)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(FetchError::Timeout {
                        name: name.to_string(),
                        seconds: timeout.as_secs(),
                    }),
                }
            })
            .await
    }
}
