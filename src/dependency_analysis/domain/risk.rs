use serde::{Deserialize, Serialize};
use std::fmt;

/// Security dimension of a package's risk profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySignals {
    pub cve_count: usize,
    pub critical_cve_count: usize,
    pub known_vulnerabilities: bool,
}

/// Maintenance cadence derived from the time since the last release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceFrequency {
    /// Released within the last 90 days
    Active,
    /// Released within the last year
    Regular,
    /// Released within the last two years
    Infrequent,
    /// No release for more than two years
    Dormant,
    Unknown,
}

impl MaintenanceFrequency {
    pub fn from_days_since_update(days: Option<u32>) -> Self {
        match days {
            Some(d) if d <= 90 => MaintenanceFrequency::Active,
            Some(d) if d <= 365 => MaintenanceFrequency::Regular,
            Some(d) if d <= 730 => MaintenanceFrequency::Infrequent,
            Some(_) => MaintenanceFrequency::Dormant,
            None => MaintenanceFrequency::Unknown,
        }
    }
}

impl fmt::Display for MaintenanceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MaintenanceFrequency::Active => "active",
            MaintenanceFrequency::Regular => "regular",
            MaintenanceFrequency::Infrequent => "infrequent",
            MaintenanceFrequency::Dormant => "dormant",
            MaintenanceFrequency::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// Operational dimension: release recency and community health
///
/// `days_since_last_update == None` means the registry reported no release
/// date; it is an unbounded/unknown value, not zero days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalSignals {
    pub days_since_last_update: Option<u32>,
    pub maintenance_frequency: MaintenanceFrequency,
    pub community_size: Option<u64>,
    /// Estimated number of maintainers whose departure would stall the project
    pub bus_factor: Option<u32>,
}

/// Supply-chain dimension: how much a package drags in and how deep it sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChainSignals {
    pub direct_dependencies: usize,
    pub transitive_dependencies: usize,
    pub depth_level: usize,
}

/// Per-dimension risk signals behind an aggregate score.
///
/// A `None` dimension means "insufficient data". It must be treated as
/// unknown, never as a zero (safe) value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBreakdown {
    pub security: Option<SecuritySignals>,
    pub operational: Option<OperationalSignals>,
    pub supply_chain: Option<SupplyChainSignals>,
}

impl RiskBreakdown {
    pub fn has_known_vulnerabilities(&self) -> bool {
        self.security
            .map(|s| s.known_vulnerabilities)
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.security.is_none() && self.operational.is_none() && self.supply_chain.is_none()
    }
}

impl fmt::Display for RiskBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.security {
            Some(s) => write!(
                f,
                "security: {} CVE(s), {} critical",
                s.cve_count, s.critical_cve_count
            )?,
            None => write!(f, "security: unknown")?,
        }
        match &self.operational {
            Some(o) => {
                let days = o
                    .days_since_last_update
                    .map(|d| format!("{} day(s) since release", d))
                    .unwrap_or_else(|| "release date unknown".to_string());
                write!(f, "; operational: {} ({})", days, o.maintenance_frequency)?
            }
            None => write!(f, "; operational: unknown")?,
        }
        match &self.supply_chain {
            Some(s) => write!(
                f,
                "; supply chain: {} direct, {} transitive, depth {}",
                s.direct_dependencies, s.transitive_dependencies, s.depth_level
            ),
            None => write!(f, "; supply chain: unknown"),
        }
    }
}

/// Output of the risk aggregator for one package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Aggregate score on a 0-10 scale; absent when no dimension had data
    pub risk_score: Option<f64>,
    pub breakdown: RiskBreakdown,
}

impl RiskAssessment {
    pub fn new(risk_score: Option<f64>, breakdown: RiskBreakdown) -> Self {
        Self {
            risk_score,
            breakdown,
        }
    }

    pub fn has_cve(&self) -> bool {
        self.breakdown.has_known_vulnerabilities()
    }
}
