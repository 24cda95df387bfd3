use super::model::{EdgeId, ElementRef, NodeId};

/// What a `delete_selected` or `remove_*` call took out of the diagram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deletion {
    /// Nodes removed directly.
    pub nodes: Vec<NodeId>,
    /// Edges removed directly.
    pub edges: Vec<EdgeId>,
    /// Edges swept because one of their endpoints was removed.
    pub cascaded: Vec<EdgeId>,
}

impl Deletion {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.cascaded.is_empty()
    }

    /// Every edge id that no longer exists after this deletion.
    pub fn all_edges(&self) -> impl Iterator<Item = &EdgeId> {
        self.edges.iter().chain(self.cascaded.iter())
    }
}

/// A single effective change to a diagram. No-op calls never produce one.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    NodeCreated(NodeId),
    EdgeCreated(EdgeId),
    LabelChanged(ElementRef),
    NodeMoved(NodeId),
    SelectionChanged,
    Deleted(Deletion),
}

/// Handle returned by `subscribe`, used to detach the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GraphEvent) + Send>;

/// Listener registry owned by a graph store.
#[derive(Default)]
pub(crate) struct Observers {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&mut self, event: &GraphEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}
