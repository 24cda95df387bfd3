use crate::graph::{EdgeId, ElementRef, NodeId};

pub const NODE_RENAME_TITLE: &str = "Rename node";
pub const EDGE_RENAME_TITLE: &str = "Label connection";

/// Which element, if any, the label editor is currently bound to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RenameState {
    #[default]
    Idle,
    EditingNode(NodeId),
    EditingEdge(EdgeId),
}

impl RenameState {
    pub fn is_idle(&self) -> bool {
        matches!(self, RenameState::Idle)
    }

    pub fn target(&self) -> Option<ElementRef> {
        match self {
            RenameState::Idle => None,
            RenameState::EditingNode(id) => Some(ElementRef::Node(id.clone())),
            RenameState::EditingEdge(id) => Some(ElementRef::Edge(id.clone())),
        }
    }

    pub fn title(&self) -> Option<&'static str> {
        match self {
            RenameState::Idle => None,
            RenameState::EditingNode(_) => Some(NODE_RENAME_TITLE),
            RenameState::EditingEdge(_) => Some(EDGE_RENAME_TITLE),
        }
    }
}
