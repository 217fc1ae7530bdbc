/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_registry_client;
mod mock_repository_metadata;
mod mock_vulnerability_repository;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_registry_client::MockRegistryClient;
pub use mock_repository_metadata::MockRepositoryMetadata;
pub use mock_vulnerability_repository::MockVulnerabilityRepository;
