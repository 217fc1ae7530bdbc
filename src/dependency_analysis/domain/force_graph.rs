use serde::{Deserialize, Serialize};

/// Which algorithm produced the `level` values of a graph.
///
/// The two are not interchangeable: discovery levels come from the
/// depth-first resolver and depend on traversal order, breadth-first
/// levels are shortest hop counts from the root of an adjacency map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Leveling {
    /// Levels fixed at first visit by the depth-first resolver
    #[default]
    Discovery,
    /// Levels computed by breadth-first search from the root
    BreadthFirst,
}

/// Visualization node for force-directed layouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub version: String,
    pub level: usize,
    /// Risk group 1..=4, see `RiskGroup`
    pub group: u8,
    #[serde(rename = "hasCVE")]
    pub has_cve: bool,
    pub risk_score: f64,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub value: u32,
}

impl GraphLink {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value: 1,
        }
    }
}

/// D3-style `{nodes, links}` graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    #[serde(skip)]
    pub leveling: Leveling,
}

impl ForceGraph {
    pub fn new(nodes: Vec<GraphNode>, links: Vec<GraphLink>, leveling: Leveling) -> Self {
        Self {
            nodes,
            links,
            leveling,
        }
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn cve_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.has_cve).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_json_shape() {
        let graph = ForceGraph::new(
            vec![GraphNode {
                id: "requests".to_string(),
                name: "requests".to_string(),
                version: "2.32.3".to_string(),
                level: 0,
                group: 4,
                has_cve: false,
                risk_score: 1.5,
                size: 14,
            }],
            vec![GraphLink::new("requests", "urllib3")],
            Leveling::Discovery,
        );

        let json = serde_json::to_value(&graph).unwrap();
        let node = &json["nodes"][0];
        for key in ["id", "name", "version", "level", "group", "hasCVE", "riskScore", "size"] {
            assert!(node.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["links"][0]["value"], 1);
        assert!(json.get("leveling").is_none());
    }

    #[test]
    fn test_cve_node_count() {
        let mk = |id: &str, cve: bool| GraphNode {
            id: id.to_string(),
            name: id.to_string(),
            version: "1".to_string(),
            level: 0,
            group: if cve { 1 } else { 4 },
            has_cve: cve,
            risk_score: 0.0,
            size: 10,
        };
        let graph = ForceGraph::new(vec![mk("a", true), mk("b", false)], vec![], Leveling::Discovery);
        assert_eq!(graph.cve_node_count(), 1);
        assert!(graph.node("b").is_some());
    }
}
