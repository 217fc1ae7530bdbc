use crate::dependency_analysis::domain::{CvssScore, Severity, Vulnerability};
use crate::ports::outbound::VulnerabilityRepository;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// OSV API client for fetching vulnerability data
///
/// Uses the OSV.dev single query API; full vulnerability records come back
/// in one response, so no per-ID detail requests are needed.
///
/// # Security
/// - Implements timeout (30 seconds)
/// - Does not retry failed requests (a failed lookup leaves the security
///   dimension unknown instead of stalling the walk)
pub struct OsvClient {
    client: Client,
    api_url: String,
}

impl OsvClient {
    const API_ENDPOINT: &'static str = "https://api.osv.dev/v1/query";
    const TIMEOUT_SECONDS: u64 = 30;
    const ECOSYSTEM: &'static str = "PyPI";

    /// Creates a new OSV API client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_api_url(Self::API_ENDPOINT)
    }

    /// Creates a client against an OSV-compatible endpoint
    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("pypi-risk-graph/{}", version);
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    fn build_query(package_name: &str, version: Option<&str>) -> OsvQuery {
        OsvQuery {
            package: OsvPackage {
                name: package_name.to_string(),
                ecosystem: Self::ECOSYSTEM.to_string(),
            },
            version: version.map(str::to_string),
        }
    }
}

/// Converts a single OSV record to the domain model
fn convert_to_vulnerability(osv_vuln: &OsvVulnerability) -> Vulnerability {
    // Prefer CVSS v3, then v4
    let cvss_score = osv_vuln
        .severity
        .as_ref()
        .and_then(|severities| {
            severities
                .iter()
                .find(|s| s.severity_type == "CVSS_V3")
                .or_else(|| severities.iter().find(|s| s.severity_type == "CVSS_V4"))
        })
        .and_then(|s| parse_cvss_score(&s.score));

    // CVSS score first, then the database-specific label
    let severity = if let Some(score) = cvss_score {
        Severity::from_cvss_score(score)
    } else if let Some(db_severity) = osv_vuln
        .database_specific
        .as_ref()
        .and_then(|db| db.severity.as_deref())
    {
        parse_severity_string(db_severity)
    } else {
        Severity::None
    };

    Vulnerability::new(
        osv_vuln.id.clone(),
        severity,
        cvss_score,
        osv_vuln.summary.clone().unwrap_or_default(),
    )
}

#[async_trait]
impl VulnerabilityRepository for OsvClient {
    async fn lookup(&self, package_name: &str, version: Option<&str>) -> Result<Vec<Vulnerability>> {
        let query = Self::build_query(package_name, version);

        let response = self.client.post(&self.api_url).json(&query).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("OSV API returned status code {}", response.status());
        }

        let result: OsvResult = response.json().await?;
        debug!(
            package = package_name,
            count = result.vulns.len(),
            "OSV lookup finished"
        );

        Ok(result.vulns.iter().map(convert_to_vulnerability).collect())
    }
}

// OSV API request/response structures

#[derive(Debug, Serialize)]
struct OsvQuery {
    package: OsvPackage,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

#[derive(Debug, Serialize)]
struct OsvPackage {
    name: String,
    ecosystem: String,
}

#[derive(Debug, Deserialize)]
struct OsvResult {
    #[serde(default)]
    vulns: Vec<OsvVulnerability>,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerability {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    severity: Option<Vec<OsvSeverity>>,
    #[serde(default)]
    database_specific: Option<DatabaseSpecific>,
}

#[derive(Debug, Deserialize)]
struct OsvSeverity {
    #[serde(rename = "type")]
    severity_type: String, // "CVSS_V3"
    score: String, // e.g., "CVSS:3.1/AV:N/AC:L/..."
}

#[derive(Debug, Deserialize)]
struct DatabaseSpecific {
    #[serde(default)]
    severity: Option<String>, // "CRITICAL", "HIGH", "MODERATE", "MEDIUM", "LOW"
}

/// CVSS v3.x base score from a vector such as
/// `CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H` (9.8).
///
/// Returns `None` when a base metric is missing or unknown, which is the
/// case for CVSS v4 vectors.
fn parse_cvss_score(vector: &str) -> Option<CvssScore> {
    let metrics: HashMap<&str, &str> = vector
        .split('/')
        .skip(1)
        .filter_map(|part| part.split_once(':'))
        .collect();
    let metric = |key: &str| metrics.get(key).copied();

    let scope_changed = match metric("S")? {
        "U" => false,
        "C" => true,
        _ => return None,
    };
    let attack_vector = match metric("AV")? {
        "N" => 0.85,
        "A" => 0.62,
        "L" => 0.55,
        "P" => 0.2,
        _ => return None,
    };
    let attack_complexity = match metric("AC")? {
        "L" => 0.77,
        "H" => 0.44,
        _ => return None,
    };
    let privileges_required = match (metric("PR")?, scope_changed) {
        ("N", _) => 0.85,
        ("L", false) => 0.62,
        ("L", true) => 0.68,
        ("H", false) => 0.27,
        ("H", true) => 0.5,
        _ => return None,
    };
    let user_interaction = match metric("UI")? {
        "N" => 0.85,
        "R" => 0.62,
        _ => return None,
    };
    let impact_weight = |key: &str| -> Option<f64> {
        match metric(key)? {
            "N" => Some(0.0),
            "L" => Some(0.22),
            "H" => Some(0.56),
            _ => None,
        }
    };

    let unaffected: f64 = ["C", "I", "A"]
        .into_iter()
        .map(|key| impact_weight(key).map(|w| 1.0 - w))
        .product::<Option<f64>>()?;
    let iss = 1.0 - unaffected;

    let impact = if scope_changed {
        7.52 * (iss - 0.029) - 3.25 * (iss - 0.02).powi(15)
    } else {
        6.42 * iss
    };
    if impact <= 0.0 {
        return CvssScore::new(0.0).ok();
    }

    let exploitability =
        8.22 * attack_vector * attack_complexity * privileges_required * user_interaction;
    let base = if scope_changed {
        1.08 * (impact + exploitability)
    } else {
        impact + exploitability
    };

    // CVSS rounds up to one decimal
    let rounded = (base.min(10.0) * 10.0).ceil() / 10.0;
    CvssScore::new(rounded as f32).ok()
}

/// Maps the `database_specific.severity` label; GitHub advisories use
/// "MODERATE" where others use "MEDIUM".
fn parse_severity_string(severity: &str) -> Severity {
    match severity.to_uppercase().as_str() {
        "CRITICAL" => Severity::Critical,
        "HIGH" => Severity::High,
        "MODERATE" | "MEDIUM" => Severity::Medium,
        "LOW" => Severity::Low,
        _ => Severity::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osv_client_creation() {
        assert!(OsvClient::new().is_ok());
    }

    #[test]
    fn test_parse_cvss_score_known_vectors() {
        let critical = parse_cvss_score("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H").unwrap();
        assert!((critical.value() - 9.8).abs() < 0.01);

        let changed_scope =
            parse_cvss_score("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:C/C:H/I:H/A:H").unwrap();
        assert!((changed_scope.value() - 10.0).abs() < 0.01);

        let medium = parse_cvss_score("CVSS:3.1/AV:N/AC:L/PR:L/UI:R/S:U/C:L/I:L/A:L").unwrap();
        assert!(medium.value() >= 4.0 && medium.value() < 7.0);
    }

    #[test]
    fn test_parse_cvss_v4_vector_is_unscored() {
        assert!(parse_cvss_score(
            "CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N"
        )
        .is_none());
    }

    #[test]
    fn test_parse_cvss_score_no_impact() {
        let score = parse_cvss_score("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N").unwrap();
        assert_eq!(score.value(), 0.0);
    }

    #[test]
    fn test_parse_cvss_score_invalid() {
        assert!(parse_cvss_score("invalid vector").is_none());
    }

    #[test]
    fn test_parse_severity_string() {
        assert_eq!(parse_severity_string("critical"), Severity::Critical);
        assert_eq!(parse_severity_string("MODERATE"), Severity::Medium);
        assert_eq!(parse_severity_string("LOW"), Severity::Low);
        assert_eq!(parse_severity_string("UNKNOWN"), Severity::None);
    }

    #[test]
    fn test_query_serialization() {
        let json = serde_json::to_value(OsvClient::build_query("jinja2", Some("3.1.2"))).unwrap();
        assert_eq!(json["package"]["name"], "jinja2");
        assert_eq!(json["package"]["ecosystem"], "PyPI");
        assert_eq!(json["version"], "3.1.2");

        let json = serde_json::to_value(OsvClient::build_query("jinja2", None)).unwrap();
        assert!(json.get("version").is_none());
    }

    #[test]
    fn test_convert_prefers_cvss_over_database_label() {
        let json = r#"{
            "vulns": [
                {
                    "id": "GHSA-h5c8-rqwp-cp95",
                    "summary": "Jinja vulnerable to HTML attribute injection",
                    "severity": [
                        {"type": "CVSS_V3", "score": "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"}
                    ],
                    "database_specific": {"severity": "MODERATE"}
                },
                {
                    "id": "PYSEC-2019-217",
                    "database_specific": {"severity": "HIGH"}
                }
            ]
        }"#;
        let result: OsvResult = serde_json::from_str(json).unwrap();
        let vulns: Vec<Vulnerability> = result.vulns.iter().map(convert_to_vulnerability).collect();

        assert_eq!(vulns.len(), 2);
        assert_eq!(vulns[0].severity, Severity::Critical);
        assert!(vulns[0].is_critical());
        assert_eq!(vulns[1].severity, Severity::High);
        assert!(vulns[1].cvss_score.is_none());
    }

    #[test]
    fn test_empty_response_has_no_vulns() {
        let result: OsvResult = serde_json::from_str("{}").unwrap();
        assert!(result.vulns.is_empty());
    }
}
