use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Approximate advance of one label character, in diagram units.
pub const LABEL_CHAR_WIDTH: f64 = 7.4;
/// Height of a single label line, in diagram units.
pub const LABEL_LINE_HEIGHT: f64 = 18.0;

/// Opaque, immutable identifier of a node within one diagram.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

/// Opaque, immutable identifier of an edge within one diagram.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EdgeId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(NodeId);
string_id!(EdgeId);

/// Names one exit or entry point on a node's perimeter, e.g. `"yes"` on a decision.
pub type HandleId = String;

/// A point in diagram space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Rendered width and height of a node, in diagram units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

/// Which side of a node a handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Whether a handle starts connections or receives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HandleRole {
    Source,
    Target,
}

/// One connection point in a kind's fixed handle layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleSpec {
    /// `None` for the unnamed default handle on that role.
    pub id: Option<&'static str>,
    pub role: HandleRole,
    pub side: Side,
}

const fn handle(id: Option<&'static str>, role: HandleRole, side: Side) -> HandleSpec {
    HandleSpec { id, role, side }
}

const TERMINAL_START: &[HandleSpec] = &[handle(None, HandleRole::Source, Side::Bottom)];
const TERMINAL_END: &[HandleSpec] = &[handle(None, HandleRole::Target, Side::Top)];
const PASS_THROUGH: &[HandleSpec] = &[
    handle(None, HandleRole::Target, Side::Top),
    handle(None, HandleRole::Source, Side::Bottom),
];
const DECISION: &[HandleSpec] = &[
    handle(None, HandleRole::Target, Side::Top),
    handle(Some("yes"), HandleRole::Source, Side::Right),
    handle(Some("no"), HandleRole::Source, Side::Bottom),
    handle(None, HandleRole::Source, Side::Left),
];

/// The fixed set of flowchart shapes a node can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Start,
    End,
    Process,
    Decision,
    ManualInput,
    InputOutput,
    Database,
    Subprocess,
}

impl NodeKind {
    /// Every kind, in palette order.
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Start,
        NodeKind::Process,
        NodeKind::Decision,
        NodeKind::InputOutput,
        NodeKind::ManualInput,
        NodeKind::Database,
        NodeKind::Subprocess,
        NodeKind::End,
    ];

    /// The stable name used on the drag-data channel and in snapshots.
    pub fn wire_name(&self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Process => "process",
            NodeKind::Decision => "decision",
            NodeKind::ManualInput => "manualInput",
            NodeKind::InputOutput => "inputOutput",
            NodeKind::Database => "database",
            NodeKind::Subprocess => "subprocess",
        }
    }

    /// The name shown to users and used as the default label.
    pub fn human_name(&self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::End => "End",
            NodeKind::Process => "Process",
            NodeKind::Decision => "Decision",
            NodeKind::ManualInput => "Manual Input",
            NodeKind::InputOutput => "Input/Output",
            NodeKind::Database => "Database",
            NodeKind::Subprocess => "Subprocess",
        }
    }

    pub fn handles(&self) -> &'static [HandleSpec] {
        match self {
            NodeKind::Start => TERMINAL_START,
            NodeKind::End => TERMINAL_END,
            NodeKind::Decision => DECISION,
            _ => PASS_THROUGH,
        }
    }

    /// Looks up a source handle by id. `None` selects the kind's unnamed source handle.
    pub fn source_handle(&self, id: Option<&str>) -> Option<&'static HandleSpec> {
        self.handles()
            .iter()
            .find(|h| h.role == HandleRole::Source && h.id == id)
    }

    pub fn target_handle(&self) -> Option<&'static HandleSpec> {
        self.handles().iter().find(|h| h.role == HandleRole::Target)
    }

    /// The node's rendered extent for a given label.
    pub fn footprint(&self, label: &str) -> Footprint {
        let text_width = label.chars().count() as f64 * LABEL_CHAR_WIDTH;
        match self {
            // 10px/20px padding around a single line, with a minimum width.
            NodeKind::Start | NodeKind::End => Footprint {
                width: (text_width + 40.0).max(80.0),
                height: LABEL_LINE_HEIGHT + 22.0,
            },
            NodeKind::Process | NodeKind::Subprocess => Footprint {
                width: (text_width + 40.0).max(100.0),
                height: LABEL_LINE_HEIGHT + 22.0,
            },
            // A 100x100 square rotated by 45 degrees.
            NodeKind::Decision => {
                let diagonal = 100.0 * std::f64::consts::SQRT_2;
                Footprint {
                    width: diagonal,
                    height: diagonal,
                }
            }
            NodeKind::ManualInput => Footprint {
                width: 120.0,
                height: 90.0,
            },
            // 120 wide plus padding, sheared by 20 degrees.
            NodeKind::InputOutput => {
                let height = 70.0;
                Footprint {
                    width: 140.0 + height * 20f64.to_radians().tan(),
                    height,
                }
            }
            NodeKind::Database => Footprint {
                width: text_width.max(80.0),
                height: 80.0,
            },
        }
    }

    pub fn fill_color(&self) -> &'static str {
        match self {
            NodeKind::Start => "#3b82f6",
            NodeKind::End => "#ec4899",
            NodeKind::Process | NodeKind::ManualInput => "#6366f1",
            NodeKind::Decision => "#eab308",
            NodeKind::InputOutput => "#22c55e",
            NodeKind::Database => "#a855f7",
            NodeKind::Subprocess => "#f43f5e",
        }
    }

    pub fn stroke_color(&self) -> &'static str {
        match self {
            NodeKind::Start => "#2563eb",
            NodeKind::End => "#db2777",
            NodeKind::Process => "#4f46e5",
            NodeKind::ManualInput => "#4f46e5",
            NodeKind::Decision => "#ca8a04",
            NodeKind::InputOutput => "#16a34a",
            NodeKind::Database => "#9333ea",
            NodeKind::Subprocess => "#e11d48",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Returned when a string does not name any [`NodeKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.wire_name() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// A shape on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    pub position: Position,
    pub selected: bool,
}

impl Node {
    pub fn footprint(&self) -> Footprint {
        self.kind.footprint(&self.label)
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: Option<HandleId>,
    pub label: String,
    pub selected: bool,
}

impl Edge {
    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }
}

/// Addresses either a node or an edge; selection and renaming work on both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Node(NodeId),
    Edge(EdgeId),
}

impl From<NodeId> for ElementRef {
    fn from(id: NodeId) -> Self {
        ElementRef::Node(id)
    }
}

impl From<EdgeId> for ElementRef {
    fn from(id: EdgeId) -> Self {
        ElementRef::Edge(id)
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRef::Node(id) => write!(f, "node '{}'", id),
            ElementRef::Edge(id) => write!(f, "edge '{}'", id),
        }
    }
}
