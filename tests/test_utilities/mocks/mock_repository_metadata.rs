use async_trait::async_trait;
use pypi_risk_graph::ports::outbound::{RepositoryMetadata, RepositoryMetadataRepository};
use pypi_risk_graph::shared::Result;
use std::collections::HashMap;

/// Mock RepositoryMetadataRepository keyed by repository URL.
/// Unknown URLs fail like an unsupported host would.
#[derive(Default)]
pub struct MockRepositoryMetadata {
    repositories: HashMap<String, RepositoryMetadata>,
}

impl MockRepositoryMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, url: &str, metadata: RepositoryMetadata) -> Self {
        self.repositories.insert(url.to_string(), metadata);
        self
    }
}

#[async_trait]
impl RepositoryMetadataRepository for MockRepositoryMetadata {
    async fn lookup(&self, repo_ref: &str) -> Result<RepositoryMetadata> {
        match self.repositories.get(repo_ref) {
            Some(metadata) => Ok(metadata.clone()),
            None => anyhow::bail!("unsupported repository host: {}", repo_ref),
        }
    }
}
