pub mod license_priority;
pub mod risk_group;
pub mod risk_weights;

pub use license_priority::LicensePriority;
pub use risk_group::RiskGroup;
pub use risk_weights::RiskWeights;
