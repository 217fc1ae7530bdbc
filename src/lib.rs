//! pypi-risk-graph - dependency risk graphs for PyPI packages
//!
//! This library resolves the transitive dependencies of a PyPI package,
//! scores every resolved package for security, operational and supply-chain
//! risk, and exports the result as a tree, a flat list or a force-directed
//! graph. It follows a hexagonal layout.
//!
//! # Architecture
//!
//! - **Domain Layer** (`dependency_analysis`): tree, graph and risk models plus the
//!   resolution, scoring, graph building and filtering services
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): PyPI, OSV, GitHub, console and filesystem implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use pypi_risk_graph::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let scorer = RiskAggregator::new(
//!     OsvClient::new()?,
//!     GitHubRepositoryClient::new()?,
//!     RiskWeights::default(),
//! );
//! let resolver = DependencyResolver::new(PyPiRegistryClient::new()?, scorer, ResolverConfig::default());
//! let use_case = AnalyzeDependenciesUseCase::new(
//!     resolver,
//!     SpdxLicenseCatalog::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let mut ctx = ResolutionContext::new();
//! let response = use_case.execute(&mut ctx, AnalysisRequest::new("flask", 2)).await?;
//! println!("{}", GraphFormatter::new().format(&response)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod dependency_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{FlatFormatter, GraphFormatter, TreeFormatter};
    pub use crate::adapters::outbound::licenses::SpdxLicenseCatalog;
    pub use crate::adapters::outbound::network::{
        GitHubRepositoryClient, OsvClient, PyPiRegistryClient,
    };
    pub use crate::application::dto::{AnalysisRequest, AnalysisResponse, OutputFormat};
    pub use crate::application::use_cases::AnalyzeDependenciesUseCase;
    pub use crate::dependency_analysis::domain::{
        DependencyTree, ForceGraph, PackageName, RiskAssessment,
    };
    pub use crate::dependency_analysis::policies::{RiskGroup, RiskWeights};
    pub use crate::dependency_analysis::services::{
        DependencyResolver, GraphBuilder, GraphFilter, ResolutionContext, ResolverConfig,
        RiskAggregator,
    };
    pub use crate::ports::outbound::{
        LicenseService, OutputPresenter, ProgressReporter, RegistryClient, ResultFormatter,
    };
    pub use crate::shared::Result;
}
