use crate::dependency_analysis::policies::LicensePriority;
use crate::ports::outbound::{PackageMetadata, RegistryClient};
use crate::shared::error::FetchError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://pypi.org/pypi";

/// project_urls keys that usually point at the source repository
const REPOSITORY_URL_KEYS: &[&str] = &["source", "source code", "repository", "code", "github"];

#[derive(Debug, Deserialize)]
struct PyPiPackageInfo {
    info: PyPiInfo,
    #[serde(default)]
    urls: Vec<PyPiReleaseFile>,
}

#[derive(Debug, Deserialize)]
struct PyPiInfo {
    name: String,
    version: String,
    #[serde(default)]
    license: Option<String>,
    #[serde(default)]
    license_expression: Option<String>,
    #[serde(default)]
    classifiers: Vec<String>,
    #[serde(default)]
    requires_dist: Option<Vec<String>>,
    #[serde(default)]
    project_urls: Option<HashMap<String, String>>,
    #[serde(default)]
    home_page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PyPiReleaseFile {
    #[serde(default)]
    upload_time_iso_8601: Option<DateTime<Utc>>,
}

/// PyPiRegistryClient adapter for the PyPI JSON API
///
/// Implements the RegistryClient port against
/// `https://pypi.org/pypi/{name}/json` (latest release).
/// Network failures are retried with a short backoff; a 404 is final.
pub struct PyPiRegistryClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl PyPiRegistryClient {
    /// Creates a new PyPI client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a PyPI-compatible mirror
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("pypi-risk-graph/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: 3,
        })
    }

    /// Fetches package information with retry logic
    async fn fetch_with_retry(&self, name: &str) -> std::result::Result<PyPiPackageInfo, FetchError> {
        let mut attempt = 1;
        loop {
            match self.fetch_from_pypi(name).await {
                Ok(info) => return Ok(info),
                Err(e @ FetchError::Network { .. }) if attempt < self.max_retries => {
                    debug!(package = name, attempt, error = %e, "retrying PyPI request");
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Validates a package name for URL safety
    fn validate_url_component(name: &str) -> std::result::Result<(), FetchError> {
        let invalid = |reason: &str| FetchError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("contains path separators"));
        }
        if name.contains("..") {
            return Err(invalid("contains '..'"));
        }
        if name.contains('#') || name.contains('?') || name.contains('@') {
            return Err(invalid("contains URL-unsafe characters"));
        }
        Ok(())
    }

    fn package_url(&self, name: &str) -> String {
        format!("{}/{}/json", self.base_url, urlencoding::encode(name))
    }

    async fn fetch_from_pypi(&self, name: &str) -> std::result::Result<PyPiPackageInfo, FetchError> {
        Self::validate_url_component(name)?;

        let network = |details: String| FetchError::Network {
            name: name.to_string(),
            details,
        };

        let response = self
            .client
            .get(self.package_url(name))
            .send()
            .await
            .map_err(|e| network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                name: name.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(network(format!(
                "PyPI API returned status code {}",
                response.status()
            )));
        }

        response
            .json::<PyPiPackageInfo>()
            .await
            .map_err(|e| network(format!("invalid PyPI response: {}", e)))
    }
}

/// Picks the source repository URL out of PyPI's project links
fn repository_url(info: &PyPiInfo) -> Option<String> {
    let from_project_urls = info.project_urls.as_ref().and_then(|urls| {
        let mut candidates: Vec<(&String, &String)> = urls.iter().collect();
        candidates.sort();
        candidates
            .iter()
            .find(|(key, _)| REPOSITORY_URL_KEYS.contains(&key.to_lowercase().as_str()))
            .or_else(|| candidates.iter().find(|(_, url)| url.contains("github.com")))
            .map(|(_, url)| url.to_string())
    });

    from_project_urls.or_else(|| {
        info.home_page
            .as_ref()
            .filter(|url| url.contains("github.com"))
            .cloned()
    })
}

fn into_metadata(package_info: PyPiPackageInfo) -> PackageMetadata {
    let released_at = package_info
        .urls
        .iter()
        .filter_map(|file| file.upload_time_iso_8601)
        .min();
    let repository_url = repository_url(&package_info.info);
    let info = package_info.info;

    PackageMetadata {
        license: LicensePriority::select_license(
            info.license,
            info.license_expression,
            &info.classifiers,
        ),
        name: info.name,
        version: info.version,
        dependency_specifiers: info.requires_dist.unwrap_or_default(),
        released_at,
        repository_url,
    }
}

#[async_trait]
impl RegistryClient for PyPiRegistryClient {
    async fn fetch(&self, name: &str) -> std::result::Result<PackageMetadata, FetchError> {
        let package_info = self.fetch_with_retry(name).await?;
        Ok(into_metadata(package_info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUESTS_JSON: &str = r#"{
        "info": {
            "name": "requests",
            "version": "2.32.3",
            "license": "Apache-2.0",
            "license_expression": null,
            "classifiers": ["License :: OSI Approved :: Apache Software License"],
            "requires_dist": [
                "charset-normalizer<4,>=2",
                "idna<4,>=2.5",
                "PySocks!=1.5.7,>=1.5.6; extra == \"socks\""
            ],
            "project_urls": {
                "Documentation": "https://requests.readthedocs.io",
                "Source": "https://github.com/psf/requests"
            },
            "home_page": "https://requests.readthedocs.io"
        },
        "urls": [
            {"upload_time_iso_8601": "2024-05-29T15:37:49.536000Z"},
            {"upload_time_iso_8601": "2024-05-29T15:37:47.027000Z"}
        ]
    }"#;

    #[test]
    fn test_pypi_client_creation() {
        assert!(PyPiRegistryClient::new().is_ok());
    }

    #[test]
    fn test_package_url_encodes_name() {
        let client = PyPiRegistryClient::with_base_url("https://mirror.example/pypi/").unwrap();
        assert_eq!(
            client.package_url("zope.interface"),
            "https://mirror.example/pypi/zope.interface/json"
        );
    }

    #[test]
    fn test_validate_url_component() {
        assert!(PyPiRegistryClient::validate_url_component("requests").is_ok());
        for bad in ["", "../etc", "a/b", "a?b", "a#b", "user@host"] {
            let err = PyPiRegistryClient::validate_url_component(bad).unwrap_err();
            assert_eq!(err.kind(), "invalid_name", "{}", bad);
        }
    }

    #[test]
    fn test_into_metadata() {
        let info: PyPiPackageInfo = serde_json::from_str(REQUESTS_JSON).unwrap();
        let metadata = into_metadata(info);

        assert_eq!(metadata.name, "requests");
        assert_eq!(metadata.version, "2.32.3");
        assert_eq!(metadata.license.as_deref(), Some("Apache-2.0"));
        assert_eq!(metadata.dependency_specifiers.len(), 3);
        assert_eq!(
            metadata.repository_url.as_deref(),
            Some("https://github.com/psf/requests")
        );
        // Earliest upload of the release
        assert_eq!(
            metadata.released_at.unwrap().to_rfc3339(),
            "2024-05-29T15:37:47.027+00:00"
        );
    }

    #[test]
    fn test_into_metadata_minimal_response() {
        let json = r#"{"info": {"name": "tiny", "version": "0.1"}}"#;
        let metadata = into_metadata(serde_json::from_str(json).unwrap());

        assert!(metadata.dependency_specifiers.is_empty());
        assert!(metadata.license.is_none());
        assert!(metadata.released_at.is_none());
        assert!(metadata.repository_url.is_none());
    }

    #[test]
    fn test_repository_url_falls_back_to_github_home_page() {
        let json = r#"{"info": {
            "name": "attrs",
            "version": "23.2.0",
            "project_urls": {"Documentation": "https://www.attrs.org/"},
            "home_page": "https://github.com/python-attrs/attrs"
        }}"#;
        let info: PyPiPackageInfo = serde_json::from_str(json).unwrap();
        assert_eq!(
            repository_url(&info.info).as_deref(),
            Some("https://github.com/python-attrs/attrs")
        );
    }

    #[tokio::test]
    async fn test_invalid_name_is_not_sent() {
        let client = PyPiRegistryClient::with_base_url("http://127.0.0.1:9").unwrap();
        let err = client.fetch("../secret").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidName { .. }));
    }
}
