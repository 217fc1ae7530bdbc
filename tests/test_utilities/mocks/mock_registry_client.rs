use async_trait::async_trait;
use pypi_risk_graph::ports::outbound::PackageMetadata;
use pypi_risk_graph::prelude::*;
use pypi_risk_graph::shared::error::FetchError;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory package registry.
///
/// Unknown names answer `NotFound`; names registered with `with_failure`
/// answer a network error. Fetches are counted per name.
#[derive(Clone, Default)]
pub struct MockRegistryClient {
    packages: HashMap<String, PackageMetadata>,
    failing: HashSet<String>,
    total_fetches: Arc<AtomicUsize>,
    fetches: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockRegistryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: &str, version: &str, requirements: &[&str]) -> Self {
        self.packages.insert(
            name.to_string(),
            PackageMetadata {
                name: name.to_string(),
                version: version.to_string(),
                license: None,
                dependency_specifiers: requirements.iter().map(|r| r.to_string()).collect(),
                released_at: None,
                repository_url: None,
            },
        );
        self
    }

    pub fn with_license(mut self, name: &str, license: &str) -> Self {
        if let Some(package) = self.packages.get_mut(name) {
            package.license = Some(license.to_string());
        }
        self
    }

    pub fn with_repository(mut self, name: &str, url: &str) -> Self {
        if let Some(package) = self.packages.get_mut(name) {
            package.repository_url = Some(url.to_string());
        }
        self
    }

    pub fn with_failure(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn total_fetches(&self) -> usize {
        self.total_fetches.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self, name: &str) -> usize {
        self.fetches.lock().unwrap().get(name).copied().unwrap_or(0)
    }
}

#[async_trait]
impl RegistryClient for MockRegistryClient {
    async fn fetch(&self, name: &str) -> std::result::Result<PackageMetadata, FetchError> {
        self.total_fetches.fetch_add(1, Ordering::SeqCst);
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default() += 1;

        if self.failing.contains(name) {
            return Err(FetchError::Network {
                name: name.to_string(),
                details: "connection reset".to_string(),
            });
        }

        self.packages
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                name: name.to_string(),
            })
    }
}
