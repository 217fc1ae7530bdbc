use crate::application::dto::AnalysisResponse;
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;

/// TreeFormatter adapter for the raw `{root, nodes, edges}` tree
///
/// The tree is never filtered and keeps dangling and duplicate edges.
pub struct TreeFormatter;

impl TreeFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for TreeFormatter {
    fn format(&self, response: &AnalysisResponse) -> Result<String> {
        Ok(serde_json::to_string_pretty(&response.tree)?)
    }
}
