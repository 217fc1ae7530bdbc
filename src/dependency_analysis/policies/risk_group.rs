/// Score above which a package without CVEs is considered high risk
const HIGH_RISK_THRESHOLD: f64 = 7.0;

/// Score above which a package without CVEs is considered medium risk
const MEDIUM_RISK_THRESHOLD: f64 = 4.0;

/// Visual risk grouping of graph nodes.
///
/// Rules are evaluated in priority order and the first match wins, so CVE
/// presence always overrides the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskGroup {
    Vulnerable = 1,
    High = 2,
    Medium = 3,
    Low = 4,
}

impl RiskGroup {
    pub fn classify(has_cve: bool, risk_score: f64) -> Self {
        if has_cve {
            RiskGroup::Vulnerable
        } else if risk_score > HIGH_RISK_THRESHOLD {
            RiskGroup::High
        } else if risk_score > MEDIUM_RISK_THRESHOLD {
            RiskGroup::Medium
        } else {
            RiskGroup::Low
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
