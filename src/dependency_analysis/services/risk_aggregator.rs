use crate::dependency_analysis::domain::{
    DependencyTree, MaintenanceFrequency, OperationalSignals, RiskAssessment, RiskBreakdown,
    SecuritySignals, SupplyChainSignals,
};
use crate::dependency_analysis::policies::RiskWeights;
use crate::ports::outbound::{
    PackageMetadata, RepositoryMetadata, RepositoryMetadataRepository, VulnerabilityRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// RiskScorer produces the risk assessment attached to each resolved node.
///
/// The resolver only depends on this trait, so signal sources can be
/// swapped without touching tree building.
#[async_trait]
pub trait RiskScorer: Send + Sync {
    async fn score(
        &self,
        package: &PackageMetadata,
        direct_dependencies: usize,
        depth_level: usize,
    ) -> RiskAssessment;
}

/// RiskAggregator combines independently sourced signals into a risk score:
/// - security from the vulnerability repository
/// - operational from the release date and repository community metadata
/// - supply chain from the dependency structure
///
/// A source that fails or has no data leaves its dimension absent.
pub struct RiskAggregator<V, M> {
    vulnerabilities: V,
    repositories: M,
    weights: RiskWeights,
    reference_time: Option<DateTime<Utc>>,
}

impl<V, M> RiskAggregator<V, M>
where
    V: VulnerabilityRepository,
    M: RepositoryMetadataRepository,
{
    pub fn new(vulnerabilities: V, repositories: M, weights: RiskWeights) -> Self {
        Self {
            vulnerabilities,
            repositories,
            weights,
            reference_time: None,
        }
    }

    /// Pins "now" for release-age calculations
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    async fn security_signals(&self, package: &PackageMetadata) -> Option<SecuritySignals> {
        match self
            .vulnerabilities
            .lookup(&package.name, Some(&package.version))
            .await
        {
            Ok(vulns) => Some(SecuritySignals {
                cve_count: vulns.len(),
                critical_cve_count: vulns.iter().filter(|v| v.is_critical()).count(),
                known_vulnerabilities: !vulns.is_empty(),
            }),
            Err(e) => {
                warn!(package = %package.name, error = %e, "vulnerability lookup failed; security data unknown");
                None
            }
        }
    }

    async fn repository_metadata(&self, package: &PackageMetadata) -> Option<RepositoryMetadata> {
        let repo_ref = package.repository_url.as_deref()?;
        match self.repositories.lookup(repo_ref).await {
            Ok(meta) if !meta.is_empty() => Some(meta),
            Ok(_) => None,
            Err(e) => {
                debug!(package = %package.name, repo = repo_ref, error = %e, "repository metadata unavailable");
                None
            }
        }
    }

    fn operational_signals(
        &self,
        package: &PackageMetadata,
        repository: Option<&RepositoryMetadata>,
    ) -> Option<OperationalSignals> {
        let last_release = package
            .released_at
            .or_else(|| repository.and_then(|r| r.last_update));

        if last_release.is_none() && repository.is_none() {
            return None;
        }

        let now = self.reference_time.unwrap_or_else(Utc::now);
        let days = last_release.map(|t| (now - t).num_days().max(0) as u32);

        Some(OperationalSignals {
            days_since_last_update: days,
            maintenance_frequency: MaintenanceFrequency::from_days_since_update(days),
            community_size: repository.and_then(|r| r.stars),
            bus_factor: repository.and_then(|r| r.maintainers),
        })
    }
}

#[async_trait]
impl<V, M> RiskScorer for RiskAggregator<V, M>
where
    V: VulnerabilityRepository,
    M: RepositoryMetadataRepository,
{
    async fn score(
        &self,
        package: &PackageMetadata,
        direct_dependencies: usize,
        depth_level: usize,
    ) -> RiskAssessment {
        let security = self.security_signals(package).await;
        let repository = self.repository_metadata(package).await;
        let operational = self.operational_signals(package, repository.as_ref());

        let breakdown = RiskBreakdown {
            security,
            operational,
            supply_chain: Some(SupplyChainSignals {
                direct_dependencies,
                // Known only once the walk has finished, see `complete_supply_chain`
                transitive_dependencies: 0,
                depth_level,
            }),
        };

        RiskAssessment::new(self.weights.score(&breakdown), breakdown)
    }
}

/// Fills in transitive dependency counts from a finished tree.
///
/// Scores are left as computed during the walk; only the breakdown is
/// completed.
pub fn complete_supply_chain(
    tree: &DependencyTree,
    assessments: &mut BTreeMap<String, RiskAssessment>,
) {
    for (name, assessment) in assessments.iter_mut() {
        if let Some(supply_chain) = assessment.breakdown.supply_chain.as_mut() {
            supply_chain.transitive_dependencies = tree.transitive_count(name);
        }
    }
}
