pub mod dependency_tree;
pub mod force_graph;
pub mod license;
pub mod package;
pub mod risk;
pub mod vulnerability;

pub use dependency_tree::{
    DependencyEdge, DependencyNode, DependencyTree, OmittedPackage, ScoredDependency,
};
pub use force_graph::{ForceGraph, GraphLink, GraphNode, Leveling};
pub use license::{
    LicenseCapabilities, LicenseCategory, LicenseDetails, LicenseObligations, LicenseRiskLevel,
};
pub use package::PackageName;
pub use risk::{
    MaintenanceFrequency, OperationalSignals, RiskAssessment, RiskBreakdown, SecuritySignals,
    SupplyChainSignals,
};
pub use vulnerability::{CvssScore, Severity, Vulnerability};
