use crate::application::dto::AnalysisResponse;
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;

/// GraphFormatter adapter for D3-style force graph JSON
///
/// Emits `{nodes, links}` exactly; the graph is already filtered.
pub struct GraphFormatter;

impl GraphFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GraphFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for GraphFormatter {
    fn format(&self, response: &AnalysisResponse) -> Result<String> {
        let json = serde_json::to_string_pretty(&response.graph)?;
        Ok(json)
    }
}
