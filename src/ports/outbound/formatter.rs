use crate::application::dto::AnalysisResponse;
use crate::shared::Result;

/// ResultFormatter port for serializing analysis results
///
/// Formatters only serialize already-computed shapes (graph, tree, flat
/// list); they never recompute levels or scores.
pub trait ResultFormatter {
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &AnalysisResponse) -> Result<String>;
}
