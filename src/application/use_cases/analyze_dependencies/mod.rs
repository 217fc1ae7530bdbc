use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::dependency_analysis::domain::{DependencyTree, LicenseDetails, PackageName};
use crate::dependency_analysis::services::{
    CancellationFlag, DependencyResolver, GraphBuilder, ResolutionContext, ResolutionOutcome,
    RiskScorer,
};
use crate::ports::inbound::DependencyAnalysisPort;
use crate::ports::outbound::{LicenseService, ProgressReporter, RegistryClient};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use uuid::Uuid;

/// AnalyzeDependenciesUseCase - Core use case for dependency risk analysis
///
/// Orchestrates resolution, graph construction, filtering and license
/// lookup using generic dependency injection for all infrastructure.
///
/// # Type Parameters
/// * `R` - RegistryClient implementation
/// * `S` - RiskScorer implementation
/// * `L` - LicenseService implementation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeDependenciesUseCase<R, S, L, PR> {
    resolver: DependencyResolver<R, S>,
    license_service: L,
    progress_reporter: PR,
}

impl<R, S, L, PR> AnalyzeDependenciesUseCase<R, S, L, PR>
where
    R: RegistryClient,
    S: RiskScorer,
    L: LicenseService,
    PR: ProgressReporter,
{
    pub fn new(resolver: DependencyResolver<R, S>, license_service: L, progress_reporter: PR) -> Self {
        Self {
            resolver,
            license_service,
            progress_reporter,
        }
    }

    /// Handle for cancelling a running analysis (e.g. on Ctrl-C)
    pub fn cancellation(&self) -> CancellationFlag {
        self.resolver.cancellation()
    }

    /// Executes the analysis use case
    ///
    /// # Arguments
    /// * `ctx` - Resolution context; names it already visited are skipped
    /// * `request` - Root package, depth bound and graph filter
    ///
    /// # Errors
    /// Returns an error if the root name is invalid or the root package
    /// itself cannot be fetched
    pub async fn execute(
        &self,
        ctx: &mut ResolutionContext,
        request: AnalysisRequest,
    ) -> Result<AnalysisResponse> {
        // Step 1: Validate root name
        let root = PackageName::new(request.root.as_str())?;

        // Step 2: Resolve the dependency tree
        self.progress_reporter.report(&format!(
            "🔍 Resolving dependencies of {} (max depth {})",
            root, request.max_depth
        ));
        self.progress_reporter.report_progress(0, Some(root.as_str()));

        let reporter = &self.progress_reporter;
        let on_resolved =
            |resolved: usize, name: &str| reporter.report_progress(resolved, Some(name));
        let outcome = self
            .resolver
            .analyze_with_progress(ctx, root.as_str(), request.max_depth, &on_resolved)
            .await;

        self.report_resolution(&outcome);

        if let Some(failure) = outcome.omitted.iter().find(|o| o.name == root.as_str()) {
            anyhow::bail!(
                "Could not resolve root package '{}': {}",
                root,
                failure.reason
            );
        }

        // Step 3: Build and filter the graph
        let graph = GraphBuilder::from_tree(&outcome.tree);
        let graph = if request.filter.is_empty() {
            graph
        } else {
            let filtered = request.filter.apply(&graph);
            self.progress_reporter.report(&format!(
                "🔎 Filter kept {} of {} node(s), {} with known vulnerabilities",
                filtered.nodes.len(),
                graph.nodes.len(),
                filtered.cve_node_count()
            ));
            filtered
        };

        // Step 4: Classify licenses
        let licenses = self.collect_licenses(&outcome.tree);

        let ResolutionOutcome {
            tree,
            omitted,
            assessments,
            cancelled,
        } = outcome;

        Ok(AnalysisResponse {
            analysis_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            scored_dependencies: tree.to_scored_dependencies(),
            tree,
            graph,
            omitted,
            assessments,
            licenses,
            cancelled,
        })
    }

    fn report_resolution(&self, outcome: &ResolutionOutcome) {
        self.progress_reporter
            .report_progress(outcome.tree.node_count(), Some("packages resolved"));

        for omitted in &outcome.omitted {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Skipped {} ({})",
                omitted.name, omitted.reason
            ));
        }

        if outcome.cancelled {
            self.progress_reporter
                .report_error("⚠️  Warning: Analysis cancelled. Results are partial.");
        }

        let vulnerable = outcome.tree.nodes().values().filter(|n| n.has_cve).count();
        self.progress_reporter.report_completion(&format!(
            "✅ Resolved {} package(s), {} with known vulnerabilities",
            outcome.tree.node_count(),
            vulnerable
        ));
    }

    /// Looks up every distinct license string once. Unrecognised licenses
    /// are left out.
    fn collect_licenses(&self, tree: &DependencyTree) -> BTreeMap<String, LicenseDetails> {
        let mut licenses = BTreeMap::new();
        for license in tree.nodes().values().filter_map(|n| n.license.as_deref()) {
            if licenses.contains_key(license) {
                continue;
            }
            if let Some(details) = self.license_service.info(license) {
                licenses.insert(license.to_string(), details);
            }
        }
        licenses
    }
}

#[async_trait]
impl<R, S, L, PR> DependencyAnalysisPort for AnalyzeDependenciesUseCase<R, S, L, PR>
where
    R: RegistryClient,
    S: RiskScorer,
    L: LicenseService,
    PR: ProgressReporter,
{
    async fn analyze(
        &self,
        ctx: &mut ResolutionContext,
        request: AnalysisRequest,
    ) -> Result<AnalysisResponse> {
        self.execute(ctx, request).await
    }
}

#[cfg(test)]
mod tests;
