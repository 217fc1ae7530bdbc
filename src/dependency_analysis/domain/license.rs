use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Broad license family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LicenseCategory {
    Permissive,
    WeakCopyleft,
    StrongCopyleft,
    NetworkCopyleft,
    PublicDomain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseRiskLevel {
    Low,
    Medium,
    High,
}

/// What a license permits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseCapabilities {
    #[serde(rename = "use")]
    pub use_: bool,
    pub modify: bool,
    pub sell: bool,
    pub saas: bool,
}

/// What a license requires in return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseObligations {
    pub attribution: bool,
    pub include_license: bool,
    pub state_changes: bool,
    pub disclose_source: bool,
    pub share_alike: bool,
    pub network_copyleft: bool,
}

/// License service answer for one SPDX identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseDetails {
    pub spdx: String,
    pub category: LicenseCategory,
    pub risk_level: LicenseRiskLevel,
    pub capabilities: LicenseCapabilities,
    pub obligations: LicenseObligations,
    /// Notes keyed by language tag ("en", "ja", ...)
    pub localized_notes: BTreeMap<String, String>,
}
