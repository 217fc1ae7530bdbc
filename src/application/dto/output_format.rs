use crate::shared::error::AnalysisError;

/// Supported export shapes for analysis results
///
/// Shared by the CLI (inbound adapter) and the formatters (outbound
/// adapters), so it lives in the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Force-directed `{nodes, links}` graph (default)
    #[default]
    Graph,
    /// Raw `{root, nodes, edges}` dependency tree
    Tree,
    /// Flat list of scored dependencies
    Flat,
}

impl OutputFormat {
    pub const SUPPORTED: &'static str = "graph, tree, flat";
}

impl std::str::FromStr for OutputFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "graph" => Ok(OutputFormat::Graph),
            "tree" => Ok(OutputFormat::Tree),
            "flat" => Ok(OutputFormat::Flat),
            _ => Err(AnalysisError::UnsupportedFormat {
                format: s.to_string(),
                supported: Self::SUPPORTED.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Graph => write!(f, "graph"),
            OutputFormat::Tree => write!(f, "tree"),
            OutputFormat::Flat => write!(f, "flat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("graph").unwrap(), OutputFormat::Graph);
        assert_eq!(OutputFormat::from_str("TREE").unwrap(), OutputFormat::Tree);
        assert_eq!(OutputFormat::from_str(" Flat ").unwrap(), OutputFormat::Flat);
    }

    #[test]
    fn test_output_format_from_str_unsupported() {
        let err = OutputFormat::from_str("markdown").unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedFormat { .. }));
        let message = err.to_string();
        assert!(message.contains("markdown"));
        assert!(message.contains("graph, tree, flat"));
    }

    #[test]
    fn test_output_format_from_str_empty() {
        assert!(OutputFormat::from_str("").is_err());
    }

    #[test]
    fn test_output_format_display_round_trips() {
        for format in [OutputFormat::Graph, OutputFormat::Tree, OutputFormat::Flat] {
            assert_eq!(OutputFormat::from_str(&format.to_string()).unwrap(), format);
        }
    }

    #[test]
    fn test_default_is_graph() {
        assert_eq!(OutputFormat::default(), OutputFormat::Graph);
    }
}
