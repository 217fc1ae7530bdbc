/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the analysis core uses to reach
/// registries, vulnerability databases, repository hosts and the console.
pub mod formatter;
pub mod license_service;
pub mod output_presenter;
pub mod progress_reporter;
pub mod registry_client;
pub mod repository_metadata;
pub mod vulnerability_repository;

pub use formatter::ResultFormatter;
pub use license_service::LicenseService;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use registry_client::{PackageMetadata, RegistryClient};
pub use repository_metadata::{RepositoryMetadata, RepositoryMetadataRepository};
pub use vulnerability_repository::VulnerabilityRepository;
