use crate::dependency_analysis::services::GraphFilter;

/// AnalysisRequest - Internal request DTO for the analysis use case
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Root package name as typed by the user
    pub root: String,
    /// Deepest discovery level that is still fetched (root is level 0)
    pub max_depth: usize,
    /// Filter applied to the built graph
    pub filter: GraphFilter,
}

impl AnalysisRequest {
    pub fn new(root: impl Into<String>, max_depth: usize) -> Self {
        Self {
            root: root.into(),
            max_depth,
            filter: GraphFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: GraphFilter) -> Self {
        self.filter = filter;
        self
    }
}
