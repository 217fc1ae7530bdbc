use crate::dependency_analysis::domain::{ForceGraph, GraphNode};
use std::collections::HashSet;

/// Node predicates applied to a built graph.
///
/// Supplied predicates combine as a conjunction. `Some(0.0)` and `Some(0)`
/// are real constraints, `None` and `cve_only == false` are unset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GraphFilter {
    pub cve_only: bool,
    pub min_risk_score: Option<f64>,
    pub max_level: Option<usize>,
}

impl GraphFilter {
    pub fn is_empty(&self) -> bool {
        !self.cve_only && self.min_risk_score.is_none() && self.max_level.is_none()
    }

    pub fn matches(&self, node: &GraphNode) -> bool {
        if self.cve_only && !node.has_cve {
            return false;
        }
        if let Some(min) = self.min_risk_score {
            if node.risk_score < min {
                return false;
            }
        }
        if let Some(max) = self.max_level {
            if node.level > max {
                return false;
            }
        }
        true
    }

    /// Returns a new graph with the surviving nodes and only the links
    /// whose endpoints both survive
    pub fn apply(&self, graph: &ForceGraph) -> ForceGraph {
        let nodes: Vec<GraphNode> = graph
            .nodes
            .iter()
            .filter(|n| self.matches(n))
            .cloned()
            .collect();

        let kept: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let links = graph
            .links
            .iter()
            .filter(|l| kept.contains(l.source.as_str()) && kept.contains(l.target.as_str()))
            .cloned()
            .collect();

        ForceGraph::new(nodes, links, graph.leveling)
    }
}
