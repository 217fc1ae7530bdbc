use crate::application::dto::AnalysisResponse;
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;

/// FlatFormatter adapter for the scored dependency list
pub struct FlatFormatter;

impl FlatFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FlatFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for FlatFormatter {
    fn format(&self, response: &AnalysisResponse) -> Result<String> {
        Ok(serde_json::to_string_pretty(&response.scored_dependencies)?)
    }
}
