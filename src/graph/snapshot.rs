use super::model::{Edge, EdgeId, Node, NodeId};
use serde::Serialize;

/// A point-in-time copy of a diagram.
///
/// Snapshots are detached from the store, so export and upload can work on one while
/// the user keeps editing. Field names follow the camelCase shape web graph renderers
/// expect (`sourceHandle`, `manualInput`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagramSnapshot {
    pub revision: u64,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl DiagramSnapshot {
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serializes the snapshot for a JavaScript or wasm renderer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
