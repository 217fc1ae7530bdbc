use crate::dependency_analysis::domain::{
    OperationalSignals, RiskBreakdown, SecuritySignals, SupplyChainSignals,
};
use crate::shared::Result;
use serde::Deserialize;

const MAX_SCORE: f64 = 10.0;

/// Scoring policy: per-dimension weights for the aggregate risk score.
///
/// The aggregate is a weighted mean over the dimensions that are present.
/// A missing dimension is left out of both numerator and denominator; it
/// never counts as a zero-risk contribution.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub security: f64,
    pub operational: f64,
    pub supply_chain: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            security: 0.5,
            operational: 0.3,
            supply_chain: 0.2,
        }
    }
}

impl RiskWeights {
    pub fn validate(&self) -> Result<()> {
        for (label, weight) in [
            ("security", self.security),
            ("operational", self.operational),
            ("supply_chain", self.supply_chain),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                anyhow::bail!("weight '{}' must be a non-negative number, got {}", label, weight);
            }
        }
        Ok(())
    }

    /// Aggregate score on a 0-10 scale rounded to one decimal, or `None`
    /// when no weighted dimension has data.
    pub fn score(&self, breakdown: &RiskBreakdown) -> Option<f64> {
        let parts = [
            breakdown
                .security
                .as_ref()
                .map(|s| (self.security, Self::security_score(s))),
            breakdown
                .operational
                .as_ref()
                .map(|o| (self.operational, Self::operational_score(o))),
            breakdown
                .supply_chain
                .as_ref()
                .map(|s| (self.supply_chain, Self::supply_chain_score(s))),
        ];

        let (weighted, total_weight) = parts
            .iter()
            .flatten()
            .fold((0.0, 0.0), |(sum, weights), (w, s)| (sum + w * s, weights + w));

        if total_weight <= 0.0 {
            return None;
        }

        Some(((weighted / total_weight) * 10.0).round() / 10.0)
    }

    fn security_score(signals: &SecuritySignals) -> f64 {
        if signals.cve_count == 0 {
            return 0.0;
        }
        let score = 5.0 + signals.cve_count as f64 + 2.0 * signals.critical_cve_count as f64;
        score.min(MAX_SCORE)
    }

    fn operational_score(signals: &OperationalSignals) -> f64 {
        let staleness: f64 = match signals.days_since_last_update {
            Some(d) if d <= 90 => 1.0,
            Some(d) if d <= 365 => 3.0,
            Some(d) if d <= 730 => 6.0,
            Some(_) => 9.0,
            None => 5.0,
        };
        let bus_factor = match signals.bus_factor {
            Some(0 | 1) => 2.0,
            Some(2) => 1.0,
            _ => 0.0,
        };
        let community = match signals.community_size {
            Some(size) if size < 10 => 1.0,
            _ => 0.0,
        };
        (staleness + bus_factor + community).min(MAX_SCORE)
    }

    fn supply_chain_score(signals: &SupplyChainSignals) -> f64 {
        let score = 0.5 * signals.direct_dependencies as f64
            + 0.1 * signals.transitive_dependencies as f64
            + 0.5 * signals.depth_level as f64;
        score.min(MAX_SCORE)
    }
}
