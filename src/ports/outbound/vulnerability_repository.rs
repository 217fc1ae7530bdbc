use crate::dependency_analysis::domain::Vulnerability;
use crate::shared::Result;
use async_trait::async_trait;

/// VulnerabilityRepository port for known-vulnerability lookups
#[async_trait]
pub trait VulnerabilityRepository: Send + Sync {
    /// Lists known vulnerabilities for a package
    ///
    /// # Arguments
    /// * `package_name` - Name of the package
    /// * `version` - Specific version to check; `None` checks every version
    ///
    /// # Errors
    /// Returns an error if the lookup service cannot be reached or answers
    /// with an unexpected payload. Callers treat this as "security data
    /// unavailable", not as "no vulnerabilities".
    async fn lookup(&self, package_name: &str, version: Option<&str>) -> Result<Vec<Vulnerability>>;
}
