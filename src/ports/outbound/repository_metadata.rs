use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Community metadata of a source repository. Every field is optional:
/// hosts expose different subsets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepositoryMetadata {
    pub stars: Option<u64>,
    pub downloads: Option<u64>,
    pub maintainers: Option<u32>,
    pub last_update: Option<DateTime<Utc>>,
}

impl RepositoryMetadata {
    pub fn is_empty(&self) -> bool {
        self.stars.is_none()
            && self.downloads.is_none()
            && self.maintainers.is_none()
            && self.last_update.is_none()
    }
}

/// RepositoryMetadataRepository port for community/health lookups
#[async_trait]
pub trait RepositoryMetadataRepository: Send + Sync {
    /// Looks up metadata for a repository reference (usually a URL)
    ///
    /// # Errors
    /// Returns an error for unsupported hosts or failed requests.
    async fn lookup(&self, repo_ref: &str) -> Result<RepositoryMetadata>;
}
