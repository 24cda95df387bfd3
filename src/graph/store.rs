use super::events::{Deletion, GraphEvent, Observers, SubscriptionId};
use super::model::{Edge, EdgeId, ElementRef, HandleId, Node, NodeId, NodeKind, Position};
use super::snapshot::DiagramSnapshot;
use crate::error::{EndpointRole, GraphError};
use ahash::{AHashMap, AHashSet};
use log::debug;
use std::fmt;

const NODE_ID_PREFIX: &str = "dndnode_";
const EDGE_ID_PREFIX: &str = "edge_";

/// The canonical node and edge lists of a single diagram.
///
/// Elements are kept in insertion order, which is also their drawing order: later
/// elements render on top. Ids come from counters owned by this store, so two stores
/// never share id state.
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: AHashMap<NodeId, usize>,
    edge_index: AHashMap<EdgeId, usize>,
    next_node_id: u64,
    next_edge_id: u64,
    revision: u64,
    observers: Observers,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphStore")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl GraphStore {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            node_index: AHashMap::new(),
            edge_index: AHashMap::new(),
            next_node_id: 0,
            next_edge_id: 0,
            revision: 0,
            observers: Observers::default(),
        }
    }

    /// A fresh diagram holding a single `Start` node near the top of the canvas.
    pub fn with_starter() -> Self {
        let mut store = Self::new();
        store.create_node(NodeKind::Start, NodeKind::Start.human_name(), Position::new(250.0, 5.0));
        store
    }

    // --- Mutations ---

    /// Appends a node and returns its fresh id. Never fails.
    pub fn create_node(
        &mut self,
        kind: NodeKind,
        label: impl Into<String>,
        position: Position,
    ) -> NodeId {
        let id = NodeId::from(format!("{}{}", NODE_ID_PREFIX, self.next_node_id));
        self.next_node_id += 1;

        self.node_index.insert(id.clone(), self.nodes.len());
        self.nodes.push(Node {
            id: id.clone(),
            kind,
            label: label.into(),
            position,
            selected: false,
        });

        debug!(
            "Created {} node '{}' at ({}, {})",
            kind, id, position.x, position.y
        );
        self.commit(GraphEvent::NodeCreated(id.clone()));
        id
    }

    /// Connects two live nodes. Parallel edges and self-loops are allowed.
    pub fn create_edge(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        source_handle: Option<HandleId>,
    ) -> Result<EdgeId, GraphError> {
        if !self.node_index.contains_key(source) {
            return Err(GraphError::InvalidReference {
                node_id: source.clone(),
                role: EndpointRole::Source,
            });
        }
        if !self.node_index.contains_key(target) {
            return Err(GraphError::InvalidReference {
                node_id: target.clone(),
                role: EndpointRole::Target,
            });
        }

        let id = EdgeId::from(format!("{}{}", EDGE_ID_PREFIX, self.next_edge_id));
        self.next_edge_id += 1;

        self.edge_index.insert(id.clone(), self.edges.len());
        self.edges.push(Edge {
            id: id.clone(),
            source: source.clone(),
            target: target.clone(),
            source_handle,
            label: String::new(),
            selected: false,
        });

        debug!("Created edge '{}' from '{}' to '{}'", id, source, target);
        self.commit(GraphEvent::EdgeCreated(id.clone()));
        Ok(id)
    }

    /// Replaces the label of a node or edge. Returns `false` (and changes nothing)
    /// when the element does not exist.
    pub fn update_label(&mut self, element: &ElementRef, label: impl Into<String>) -> bool {
        let label = label.into();
        let slot = match element {
            ElementRef::Node(id) => self
                .node_index
                .get(id)
                .map(|&idx| &mut self.nodes[idx].label),
            ElementRef::Edge(id) => self
                .edge_index
                .get(id)
                .map(|&idx| &mut self.edges[idx].label),
        };
        let Some(current) = slot else {
            return false;
        };
        if *current != label {
            *current = label;
            debug!("Relabelled {}", element);
            self.commit(GraphEvent::LabelChanged(element.clone()));
        }
        true
    }

    /// Moves a node. Returns `false` when the node does not exist.
    pub fn update_position(&mut self, node_id: &NodeId, position: Position) -> bool {
        let Some(&idx) = self.node_index.get(node_id) else {
            return false;
        };
        let node = &mut self.nodes[idx];
        if node.position != position {
            node.position = position;
            self.commit(GraphEvent::NodeMoved(node_id.clone()));
        }
        true
    }

    /// Selects exactly the given elements and clears every other selection flag.
    /// Unknown ids are skipped.
    pub fn set_selection<I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = ElementRef>,
    {
        let mut wanted_nodes = AHashSet::new();
        let mut wanted_edges = AHashSet::new();
        for element in elements {
            match element {
                ElementRef::Node(id) => wanted_nodes.insert(id),
                ElementRef::Edge(id) => wanted_edges.insert(id),
            };
        }

        let mut changed = false;
        for node in &mut self.nodes {
            let selected = wanted_nodes.contains(&node.id);
            changed |= node.selected != selected;
            node.selected = selected;
        }
        for edge in &mut self.edges {
            let selected = wanted_edges.contains(&edge.id);
            changed |= edge.selected != selected;
            edge.selected = selected;
        }

        if changed {
            self.commit(GraphEvent::SelectionChanged);
        }
    }

    /// Removes every selected element, then sweeps edges left without an endpoint.
    ///
    /// The sweep runs after all explicit removals so that edges attached to a removed
    /// node are caught even when they were not selected themselves.
    pub fn delete_selected(&mut self) -> Deletion {
        let mut deletion = Deletion::default();

        self.nodes.retain(|node| {
            if node.selected {
                deletion.nodes.push(node.id.clone());
            }
            !node.selected
        });
        self.edges.retain(|edge| {
            if edge.selected {
                deletion.edges.push(edge.id.clone());
            }
            !edge.selected
        });
        self.reindex();

        deletion.cascaded = self.sweep_dangling_edges();
        self.finish_deletion(deletion)
    }

    /// Removes one node and every edge attached to it.
    pub fn remove_node(&mut self, node_id: &NodeId) -> Deletion {
        let mut deletion = Deletion::default();
        if let Some(idx) = self.node_index.get(node_id).copied() {
            let node = self.nodes.remove(idx);
            deletion.nodes.push(node.id);
            self.reindex();
            deletion.cascaded = self.sweep_dangling_edges();
        }
        self.finish_deletion(deletion)
    }

    /// Removes one edge. Returns `false` when it does not exist.
    pub fn remove_edge(&mut self, edge_id: &EdgeId) -> bool {
        let Some(idx) = self.edge_index.get(edge_id).copied() else {
            return false;
        };
        let edge = self.edges.remove(idx);
        self.reindex();
        self.finish_deletion(Deletion {
            edges: vec![edge.id],
            ..Deletion::default()
        });
        true
    }

    // --- Observation ---

    /// Registers a listener that receives every effective change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GraphEvent) + Send + 'static,
    {
        self.observers.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Bumped once per effective mutation; lets polling renderers detect change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // --- Reads ---

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edge_index.get(id).map(|&idx| &self.edges[idx])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// The current selection, nodes first, each group in drawing order.
    pub fn selection(&self) -> Vec<ElementRef> {
        self.nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| ElementRef::Node(n.id.clone()))
            .chain(
                self.edges
                    .iter()
                    .filter(|e| e.selected)
                    .map(|e| ElementRef::Edge(e.id.clone())),
            )
            .collect()
    }

    /// A detached copy of the diagram for rendering or export.
    pub fn snapshot(&self) -> DiagramSnapshot {
        DiagramSnapshot {
            revision: self.revision,
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    // --- Internals ---

    fn sweep_dangling_edges(&mut self) -> Vec<EdgeId> {
        let node_index = &self.node_index;
        let mut swept = Vec::new();
        self.edges.retain(|edge| {
            let alive =
                node_index.contains_key(&edge.source) && node_index.contains_key(&edge.target);
            if !alive {
                swept.push(edge.id.clone());
            }
            alive
        });
        if !swept.is_empty() {
            self.reindex();
        }
        swept
    }

    fn finish_deletion(&mut self, deletion: Deletion) -> Deletion {
        if !deletion.is_empty() {
            debug!(
                "Deleted {} node(s), {} edge(s), {} cascaded edge(s)",
                deletion.nodes.len(),
                deletion.edges.len(),
                deletion.cascaded.len()
            );
            self.commit(GraphEvent::Deleted(deletion.clone()));
        }
        deletion
    }

    fn reindex(&mut self) {
        self.node_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id.clone(), idx))
            .collect();
        self.edge_index = self
            .edges
            .iter()
            .enumerate()
            .map(|(idx, edge)| (edge.id.clone(), idx))
            .collect();
    }

    fn commit(&mut self, event: GraphEvent) {
        self.revision += 1;
        self.observers.notify(&event);
    }
}
