//! Turns raw canvas interactions into graph store operations.
//!
//! The controller owns the diagram's [`GraphStore`] together with the transient UI
//! state around it: the viewport transform, the payload of a drag in progress, and the
//! rename modal. Hit-testing, marquee selection and drawing belong to the host; the
//! controller only sees their outcomes (a drop point, a finished connection, a
//! double-clicked element, a selection set).

mod rename;
mod viewport;

pub use rename::*;
pub use viewport::*;

use crate::editor::LabelEditor;
use crate::error::{ExportError, GraphError, PublishError};
use crate::export::{ExportFormat, ExportOptions, ExportedImage, export_diagram};
use crate::graph::{
    Deletion, EdgeId, ElementRef, GraphStore, HandleId, NodeId, NodeKind, Position,
};
use crate::palette::DragPayload;
use crate::upload::{RemoteUpload, UploadReceipt};
use log::{debug, warn};
use std::future::Future;

/// Key names that delete the current selection.
pub const DELETE_KEYS: [&str; 2] = ["Backspace", "Delete"];

/// A finished drag from a node's source handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub source: NodeId,
    pub source_handle: Option<HandleId>,
    /// `None` when the drag was released over empty canvas.
    pub target: Option<NodeId>,
}

impl Connection {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            source_handle: None,
            target: Some(target),
        }
    }

    pub fn from_handle(mut self, handle: impl Into<HandleId>) -> Self {
        self.source_handle = Some(handle.into());
        self
    }
}

pub struct CanvasController {
    store: GraphStore,
    viewport: Viewport,
    editor: LabelEditor,
    rename: RenameState,
    drag: Option<DragPayload>,
    export_options: ExportOptions,
}

pub struct CanvasControllerBuilder {
    store: GraphStore,
    viewport: Viewport,
    export_options: ExportOptions,
}

impl Default for CanvasControllerBuilder {
    fn default() -> Self {
        Self {
            store: GraphStore::with_starter(),
            viewport: Viewport::default(),
            export_options: ExportOptions::default(),
        }
    }
}

impl CanvasControllerBuilder {
    /// Starts from an existing store instead of the single-`Start` starter diagram.
    pub fn with_store(mut self, store: GraphStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_export_options(mut self, options: ExportOptions) -> Self {
        self.export_options = options;
        self
    }

    pub fn build(self) -> CanvasController {
        CanvasController {
            store: self.store,
            viewport: self.viewport,
            editor: LabelEditor::new(),
            rename: RenameState::Idle,
            drag: None,
            export_options: self.export_options,
        }
    }
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CanvasController {
    pub fn builder() -> CanvasControllerBuilder {
        CanvasControllerBuilder::default()
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Direct store access, e.g. for subscribing to changes.
    pub fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn editor(&self) -> &LabelEditor {
        &self.editor
    }

    pub fn rename_state(&self) -> &RenameState {
        &self.rename
    }

    pub fn export_options(&self) -> &ExportOptions {
        &self.export_options
    }

    // --- Drag and drop ---

    /// Remembers the payload of a palette drag so a later drop can use it.
    pub fn begin_drag(&mut self, payload: DragPayload) {
        self.drag = Some(payload);
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn drag_payload(&self) -> Option<&DragPayload> {
        self.drag.as_ref()
    }

    /// Creates a node where a palette item was dropped.
    ///
    /// `screen` is relative to the canvas element. An explicit payload wins over the one
    /// recorded by [`begin_drag`](Self::begin_drag). Drops without a payload or with an
    /// unknown kind are ignored and return `None`.
    pub fn handle_drop(
        &mut self,
        payload: Option<DragPayload>,
        screen: Position,
    ) -> Option<NodeId> {
        let payload = payload.or_else(|| self.drag.take());
        self.drag = None;

        let Some(payload) = payload else {
            debug!("Ignoring drop without a payload");
            return None;
        };
        let kind = match payload.kind.parse::<NodeKind>() {
            Ok(kind) => kind,
            Err(e) => {
                warn!("Ignoring drop: {}", e);
                return None;
            }
        };

        let label = if payload.label.is_empty() {
            kind.wire_name().to_string()
        } else {
            payload.label
        };
        let position = self.viewport.screen_to_diagram(screen);
        if !position.is_finite() {
            warn!("Ignoring drop at non-finite point ({}, {})", screen.x, screen.y);
            return None;
        }
        Some(self.store.create_node(kind, label, position))
    }

    // --- Connections ---

    /// Creates an edge for a finished connect gesture.
    ///
    /// Releasing over empty canvas is a no-op (`Ok(None)`). A handle id the source kind
    /// does not declare is dropped and the edge leaves from the default exit.
    pub fn connect(&mut self, connection: Connection) -> Result<Option<EdgeId>, GraphError> {
        let Some(target) = connection.target else {
            debug!("Connection from '{}' released on empty canvas", connection.source);
            return Ok(None);
        };

        let handle = match (self.store.node(&connection.source), connection.source_handle) {
            (Some(node), Some(handle))
                if node.kind.source_handle(Some(handle.as_str())).is_some() =>
            {
                Some(handle)
            }
            (Some(node), Some(handle)) => {
                warn!(
                    "{} node '{}' has no source handle '{}'; using its default exit",
                    node.kind, node.id, handle
                );
                None
            }
            _ => None,
        };

        self.store
            .create_edge(&connection.source, &target, handle)
            .map(Some)
    }

    // --- Moving and selection ---

    /// Places a dragged node so its top-left corner sits under `screen`.
    pub fn drag_node_to(&mut self, node_id: &NodeId, screen: Position) -> bool {
        let position = self.viewport.screen_to_diagram(screen);
        position.is_finite() && self.store.update_position(node_id, position)
    }

    /// Moves a node by a screen-space distance.
    pub fn move_node_by(&mut self, node_id: &NodeId, dx: f64, dy: f64) -> bool {
        let Some(current) = self.store.node(node_id).map(|n| n.position) else {
            return false;
        };
        let (dx, dy) = self.viewport.scale_delta(dx, dy);
        let position = current.offset(dx, dy);
        position.is_finite() && self.store.update_position(node_id, position)
    }

    /// Forwards the selection the rendering substrate settled on.
    pub fn select<I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = ElementRef>,
    {
        self.store.set_selection(elements);
    }

    pub fn delete_selected(&mut self) -> Deletion {
        self.store.delete_selected()
    }

    /// Handles a key press on the canvas. Delete keys remove the selection unless the
    /// rename modal has focus, in which case the key belongs to its text field.
    pub fn handle_key(&mut self, key: &str) -> Option<Deletion> {
        if self.editor.is_open() || !DELETE_KEYS.contains(&key) {
            return None;
        }
        Some(self.delete_selected())
    }

    // --- Renaming ---

    /// Opens the rename modal for a node. Any edit already open is discarded.
    pub fn double_click_node(&mut self, node_id: &NodeId) -> bool {
        let Some(label) = self.store.node(node_id).map(|n| n.label.clone()) else {
            return false;
        };
        self.begin_rename(RenameState::EditingNode(node_id.clone()), label);
        true
    }

    /// Opens the rename modal for an edge. Any edit already open is discarded.
    pub fn double_click_edge(&mut self, edge_id: &EdgeId) -> bool {
        let Some(label) = self.store.edge(edge_id).map(|e| e.label.clone()) else {
            return false;
        };
        self.begin_rename(RenameState::EditingEdge(edge_id.clone()), label);
        true
    }

    /// Types into the open rename field.
    pub fn edit_label(&mut self, value: impl Into<String>) {
        self.editor.set_value(value);
    }

    /// Confirms the open rename and applies the field value to its target.
    /// Returns the element that was renamed.
    pub fn commit_rename(&mut self) -> Option<ElementRef> {
        let target = std::mem::take(&mut self.rename).target();
        let value = self.editor.save();
        let (target, value) = (target?, value?);
        debug!("Committing rename of {}", target);
        self.store.update_label(&target, value).then_some(target)
    }

    /// Confirms the open rename with `value` in one step.
    pub fn commit_rename_with(&mut self, value: impl Into<String>) -> Option<ElementRef> {
        self.editor.set_value(value);
        self.commit_rename()
    }

    /// Closes the rename modal without touching the diagram.
    pub fn cancel_rename(&mut self) {
        if !self.rename.is_idle() {
            debug!("Cancelled rename");
        }
        self.rename = RenameState::Idle;
        self.editor.cancel();
    }

    fn begin_rename(&mut self, state: RenameState, current: String) {
        if let Some(previous) = self.rename.target() {
            debug!("Discarding open rename of {}", previous);
        }
        let title = state.title().unwrap_or_default();
        self.editor.open(title, current);
        self.rename = state;
    }

    // --- Export ---

    /// Exports the diagram as it is right now.
    pub fn export(&self, format: ExportFormat) -> Result<ExportedImage, ExportError> {
        export_diagram(&self.store.snapshot(), format, &self.export_options)
    }

    /// Exports now and returns a future that uploads the result.
    ///
    /// The image is rendered before this returns, so the future does not borrow the
    /// controller and editing may continue while the upload runs.
    pub fn export_and_upload<'u, U>(
        &self,
        format: ExportFormat,
        uploader: &'u U,
    ) -> impl Future<Output = Result<UploadReceipt, PublishError>> + use<'u, U>
    where
        U: RemoteUpload,
    {
        let exported = self.export(format);
        async move {
            let image = exported?;
            let name = image.file_name();
            let receipt = uploader.upload(image.bytes, &name).await?;
            Ok::<_, PublishError>(receipt)
        }
    }
}
