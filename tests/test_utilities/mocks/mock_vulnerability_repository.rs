use async_trait::async_trait;
use pypi_risk_graph::dependency_analysis::domain::{Severity, Vulnerability};
use pypi_risk_graph::ports::outbound::VulnerabilityRepository;
use pypi_risk_graph::shared::Result;
use std::collections::HashMap;

/// Mock VulnerabilityRepository keyed by package name
#[derive(Default)]
pub struct MockVulnerabilityRepository {
    vulnerabilities: HashMap<String, Vec<Vulnerability>>,
    should_fail: bool,
}

impl MockVulnerabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vulnerability(mut self, package: &str, id: &str, severity: Severity) -> Self {
        self.vulnerabilities
            .entry(package.to_string())
            .or_default()
            .push(Vulnerability::new(id, severity, None, "test advisory"));
        self
    }

    pub fn with_failure() -> Self {
        Self {
            vulnerabilities: HashMap::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl VulnerabilityRepository for MockVulnerabilityRepository {
    async fn lookup(&self, package_name: &str, _version: Option<&str>) -> Result<Vec<Vulnerability>> {
        if self.should_fail {
            anyhow::bail!("vulnerability service unavailable");
        }
        Ok(self
            .vulnerabilities
            .get(package_name)
            .cloned()
            .unwrap_or_default())
    }
}
