use crate::dependency_analysis::domain::{
    DependencyTree, ForceGraph, LicenseDetails, OmittedPackage, RiskAssessment, ScoredDependency,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// AnalysisResponse - Result of one dependency analysis
///
/// `graph` is already filtered; `tree`, `scored_dependencies` and
/// `assessments` always describe the full resolution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub tree: DependencyTree,
    pub graph: ForceGraph,
    pub scored_dependencies: Vec<ScoredDependency>,
    pub omitted: Vec<OmittedPackage>,
    pub assessments: BTreeMap<String, RiskAssessment>,
    /// License details keyed by the license string found on the packages
    pub licenses: BTreeMap<String, LicenseDetails>,
    pub cancelled: bool,
}

impl AnalysisResponse {
    pub fn vulnerable_packages(&self) -> Vec<&str> {
        self.tree
            .nodes()
            .values()
            .filter(|n| n.has_cve)
            .map(|n| n.name.as_str())
            .collect()
    }

    pub fn has_vulnerabilities(&self) -> bool {
        self.tree.nodes().values().any(|n| n.has_cve)
    }

    /// True when packages were omitted or the walk was cancelled
    pub fn is_partial(&self) -> bool {
        self.cancelled || !self.omitted.is_empty()
    }
}
