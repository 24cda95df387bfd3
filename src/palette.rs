//! The shape toolbox and the payload it hands to the canvas on drag.
use crate::graph::NodeKind;
use log::debug;

/// Drag-data key carrying the node kind.
pub const KIND_MIME: &str = "application/reactflow";
/// Drag-data key carrying the suggested label.
pub const LABEL_MIME: &str = "application/reactflow/label";

/// What travels from the palette to the canvas during a drag.
///
/// Both fields are raw strings as read from the host's drag-data channel; the
/// canvas decides whether `kind` names a real shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragPayload {
    pub kind: String,
    pub label: String,
}

impl DragPayload {
    pub fn new(kind: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            label: label.into(),
        }
    }

    /// Reads a payload through a host accessor such as `DataTransfer.getData`.
    ///
    /// Returns `None` when no kind was set, which the canvas treats as "nothing dropped".
    pub fn from_data_transfer<F>(mut get_data: F) -> Option<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let kind = get_data(KIND_MIME).filter(|k| !k.is_empty())?;
        let label = get_data(LABEL_MIME).unwrap_or_default();
        Some(Self { kind, label })
    }

    /// The `(key, value)` pairs a host should write when a drag starts.
    pub fn data_entries(&self) -> [(&'static str, &str); 2] {
        [(KIND_MIME, self.kind.as_str()), (LABEL_MIME, self.label.as_str())]
    }
}

/// One draggable entry in the toolbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteItem {
    pub kind: NodeKind,
    pub label: &'static str,
}

impl PaletteItem {
    /// Called when the user starts dragging this entry.
    pub fn drag_start(&self) -> DragPayload {
        debug!("Drag started for palette item '{}'", self.kind);
        DragPayload::new(self.kind.wire_name(), self.label)
    }
}

/// The fixed list of shapes offered for dragging.
#[derive(Debug, Clone)]
pub struct Palette {
    items: Vec<PaletteItem>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            items: NodeKind::ALL
                .into_iter()
                .map(|kind| PaletteItem {
                    kind,
                    label: kind.human_name(),
                })
                .collect(),
        }
    }
}

impl Palette {
    pub fn items(&self) -> &[PaletteItem] {
        &self.items
    }

    pub fn item(&self, kind: NodeKind) -> Option<&PaletteItem> {
        self.items.iter().find(|item| item.kind == kind)
    }

    pub fn drag_start(&self, kind: NodeKind) -> Option<DragPayload> {
        self.item(kind).map(PaletteItem::drag_start)
    }
}
