use crate::shared::error::FetchError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw registry metadata for the latest release of one package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub license: Option<String>,
    /// Raw requirement strings as published (e.g. `"urllib3<3,>=1.21.1"`)
    pub dependency_specifiers: Vec<String>,
    /// Upload time of the release, if the registry reports one
    pub released_at: Option<DateTime<Utc>>,
    /// Source repository URL, used for community metadata lookups
    pub repository_url: Option<String>,
}

/// RegistryClient port for fetching package metadata
///
/// Implementations must be `Send + Sync`: the resolver may fetch sibling
/// packages concurrently through a shared reference.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Fetches metadata for the latest release of `name`
    ///
    /// # Errors
    /// Returns a [`FetchError`] describing why the package could not be
    /// fetched (not found, network failure, invalid name). The resolver
    /// treats every error as "omit and continue".
    async fn fetch(&self, name: &str) -> Result<PackageMetadata, FetchError>;
}
