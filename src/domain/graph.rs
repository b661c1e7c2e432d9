use crate::domain::edge::Edge;
use crate::domain::node::Node;
use serde::{Deserialize, Serialize};

/// Package Graph - the linearized output of a build
///
/// Serialized as the `/data` payload: exactly `nodes` and `edges`, in build order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl PackageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
