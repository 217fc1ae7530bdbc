use crate::dependency_analysis::domain::{
    DependencyTree, ForceGraph, GraphLink, GraphNode, Leveling, ScoredDependency,
};
use crate::dependency_analysis::policies::RiskGroup;
use std::collections::{HashMap, HashSet, VecDeque};

/// Base node size before out-degree is added
const BASE_NODE_SIZE: usize = 10;

/// Size added per outgoing dependency
const SIZE_PER_DEPENDENCY: usize = 2;

/// GraphBuilder service converting dependency data into force-directed graphs
///
/// Pure transformation with no I/O. Inputs are never mutated.
pub struct GraphBuilder;

impl GraphBuilder {
    /// Builds a graph from a resolved tree
    ///
    /// One node per tree node carrying its discovery level. Every tree edge
    /// becomes a link, including edges whose target never materialized.
    pub fn from_tree(tree: &DependencyTree) -> ForceGraph {
        let nodes = tree
            .nodes()
            .values()
            .map(|node| {
                Self::node(
                    &node.name,
                    &node.version,
                    node.level,
                    node.has_cve,
                    node.risk_score,
                    node.dependency_names.len(),
                )
            })
            .collect();

        let links = tree
            .edges()
            .iter()
            .map(|edge| GraphLink::new(edge.source.as_str(), edge.target.as_str()))
            .collect();

        ForceGraph::new(nodes, links, Leveling::Discovery)
    }

    /// Builds a graph from an already-scored flat list
    ///
    /// # Arguments
    /// * `dependencies` - Scored packages; each becomes one node
    /// * `adjacency` - Map of package name to its dependency names
    /// * `root` - Start of the breadth-first leveling; `None` puts every node at level 0
    ///
    /// Links are kept only when both endpoints are in `dependencies`.
    pub fn from_flat(
        dependencies: &[ScoredDependency],
        adjacency: &HashMap<String, Vec<String>>,
        root: Option<&str>,
    ) -> ForceGraph {
        let levels = root
            .map(|r| Self::breadth_first_levels(r, adjacency))
            .unwrap_or_default();

        let nodes = dependencies
            .iter()
            .map(|dep| {
                Self::node(
                    &dep.name,
                    &dep.version,
                    levels.get(&dep.name).copied().unwrap_or(0),
                    dep.has_cve,
                    dep.risk_score,
                    adjacency.get(&dep.name).map_or(0, Vec::len),
                )
            })
            .collect();

        let present: HashSet<&str> = dependencies.iter().map(|d| d.name.as_str()).collect();
        let links = dependencies
            .iter()
            .filter_map(|dep| adjacency.get(&dep.name).map(|targets| (dep, targets)))
            .flat_map(|(dep, targets)| {
                targets
                    .iter()
                    .filter(|target| present.contains(target.as_str()))
                    .map(move |target| GraphLink::new(dep.name.as_str(), target.as_str()))
            })
            .collect();

        ForceGraph::new(nodes, links, Leveling::BreadthFirst)
    }

    /// Shortest hop count from `root` for every reachable name
    ///
    /// Children are visited in adjacency order and the first assignment wins,
    /// so the result is deterministic for a given map.
    pub fn breadth_first_levels(
        root: &str,
        adjacency: &HashMap<String, Vec<String>>,
    ) -> HashMap<String, usize> {
        let mut levels = HashMap::new();
        let mut queue = VecDeque::new();

        levels.insert(root.to_string(), 0);
        queue.push_back(root);

        while let Some(current) = queue.pop_front() {
            let next_level = levels[current] + 1;
            for child in adjacency.get(current).into_iter().flatten() {
                if !levels.contains_key(child) {
                    levels.insert(child.clone(), next_level);
                    queue.push_back(child.as_str());
                }
            }
        }

        levels
    }

    fn node(
        name: &str,
        version: &str,
        level: usize,
        has_cve: bool,
        risk_score: Option<f64>,
        out_degree: usize,
    ) -> GraphNode {
        let risk_score = risk_score.unwrap_or(0.0);
        GraphNode {
            id: name.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            level,
            group: RiskGroup::classify(has_cve, risk_score).as_u8(),
            has_cve,
            risk_score,
            size: BASE_NODE_SIZE + SIZE_PER_DEPENDENCY * out_degree,
        }
    }
}
