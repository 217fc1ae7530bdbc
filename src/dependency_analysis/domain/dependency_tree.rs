use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// One resolved package in a dependency tree.
///
/// `level` is the discovery level: the depth at which the depth-first
/// resolver first reached the package. It is fixed at first visit and
/// never revised, even if a shorter path is found later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    pub name: String,
    pub version: String,
    pub level: usize,
    pub dependency_names: Vec<String>,
    #[serde(rename = "hasCVE")]
    pub has_cve: bool,
    pub risk_score: Option<f64>,
    pub license: Option<String>,
}

/// A "depends-on" edge between two package names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
}

impl DependencyEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// DependencyTree aggregate: an arena of nodes keyed by name plus edges.
///
/// Invariants:
/// - a name appears in `nodes` at most once;
/// - `edges` may reference targets absent from `nodes` (dangling edges for
///   depth-cut or fetch-failed packages);
/// - the same edge may appear more than once when reached through
///   several diamond paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyTree {
    root: String,
    nodes: BTreeMap<String, DependencyNode>,
    edges: Vec<DependencyEdge>,
}

impl DependencyTree {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            nodes: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn nodes(&self) -> &BTreeMap<String, DependencyNode> {
        &self.nodes
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn node(&self, name: &str) -> Option<&DependencyNode> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts a node. Returns `false` and leaves the tree untouched when a
    /// node with the same name already exists.
    pub fn insert_node(&mut self, node: DependencyNode) -> bool {
        if self.nodes.contains_key(&node.name) {
            return false;
        }
        self.nodes.insert(node.name.clone(), node);
        true
    }

    pub fn push_edge(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.edges.push(DependencyEdge::new(source, target));
    }

    /// Edges whose target was never materialized as a node
    pub fn dangling_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.edges
            .iter()
            .filter(|edge| !self.nodes.contains_key(&edge.target))
    }

    /// Adjacency relation (name -> direct dependency names) of the materialized nodes
    pub fn adjacency(&self) -> HashMap<String, Vec<String>> {
        self.nodes
            .values()
            .map(|node| (node.name.clone(), node.dependency_names.clone()))
            .collect()
    }

    /// Flattened, already-scored result rows in name order
    pub fn to_scored_dependencies(&self) -> Vec<ScoredDependency> {
        self.nodes.values().map(ScoredDependency::from).collect()
    }

    /// Number of distinct packages reachable from `name`, excluding itself.
    ///
    /// Names that were never materialized still count; only materialized
    /// nodes are expanded further.
    pub fn transitive_count(&self, name: &str) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        seen.insert(name);
        queue.push_back(name);

        while let Some(current) = queue.pop_front() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            for dep in &node.dependency_names {
                if seen.insert(dep.as_str()) {
                    queue.push_back(dep.as_str());
                }
            }
        }

        seen.len() - 1
    }
}

/// Flat result row consumed by report and history collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDependency {
    pub name: String,
    pub version: String,
    #[serde(rename = "hasCVE")]
    pub has_cve: bool,
    pub risk_score: Option<f64>,
    pub license: Option<String>,
}

impl From<&DependencyNode> for ScoredDependency {
    fn from(node: &DependencyNode) -> Self {
        Self {
            name: node.name.clone(),
            version: node.version.clone(),
            has_cve: node.has_cve,
            risk_score: node.risk_score,
            license: node.license.clone(),
        }
    }
}

/// A package whose metadata could not be fetched and was left out of the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmittedPackage {
    pub name: String,
    pub reason: String,
    pub kind: String,
}
