use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::dependency_analysis::services::ResolutionContext;
use crate::shared::Result;
use async_trait::async_trait;

/// DependencyAnalysisPort - Inbound port for dependency risk analysis
///
/// Callers own the [`ResolutionContext`]. Reusing one context across
/// requests shares fetched metadata, but packages visited by an earlier
/// request stay invisible until the context is reset.
#[async_trait]
pub trait DependencyAnalysisPort: Send + Sync {
    /// Analyzes the dependency graph of one root package
    ///
    /// # Errors
    /// Returns an error if:
    /// - The root package name is invalid
    /// - The root package cannot be fetched from the registry
    async fn analyze(
        &self,
        ctx: &mut ResolutionContext,
        request: AnalysisRequest,
    ) -> Result<AnalysisResponse>;
}
