use crate::dependency_analysis::domain::LicenseDetails;

/// LicenseService port for license classification
pub trait LicenseService: Send + Sync {
    /// Returns details for a license identifier, or `None` when the
    /// identifier is not recognised
    fn info(&self, license_identifier: &str) -> Option<LicenseDetails>;
}
