//! # Flowboard - Flowchart Editing Core
//!
//! **Flowboard** is the headless core of a drag-and-drop flowchart editor. It keeps the
//! diagram's nodes and edges consistent, turns canvas interactions into edits, drives
//! the rename modal, and exports the finished chart as PNG or SVG. Rendering, hit-testing
//! and pointer handling stay with the host UI, which feeds events in and reads
//! snapshots (or change notifications) back out.
//!
//! ## Core Workflow
//!
//! 1.  **Drag from the palette**: a [`palette::PaletteItem`] produces a [`DragPayload`]
//!     carrying the shape kind and its default label.
//! 2.  **Drop on the canvas**: [`CanvasController::handle_drop`] converts the drop point
//!     through the current [`Viewport`] and creates a node.
//! 3.  **Connect and rename**: finished connect gestures become edges; double-clicks open
//!     the [`LabelEditor`] and a commit writes the new label back to the [`GraphStore`].
//! 4.  **Export**: [`CanvasController::export`] frames every node, pads the content by 50
//!     units and renders it to bytes. The result can be handed to any [`RemoteUpload`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowboard::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let palette = Palette::default();
//!     let mut canvas = CanvasController::builder()
//!         .with_store(GraphStore::new())
//!         .build();
//!
//!     // Drop a start node and a decision onto the canvas.
//!     let start = canvas
//!         .handle_drop(palette.drag_start(NodeKind::Start), Position::new(40.0, 40.0))
//!         .expect("start is a known kind");
//!     let check = canvas
//!         .handle_drop(palette.drag_start(NodeKind::Decision), Position::new(40.0, 160.0))
//!         .expect("decision is a known kind");
//!
//!     // Connect them and label the connection.
//!     let edge = canvas
//!         .connect(Connection::new(start, check))?
//!         .expect("dropped on a node");
//!     canvas.double_click_edge(&edge);
//!     canvas.commit_rename_with("begin");
//!
//!     // Render the whole diagram, regardless of pan and zoom.
//!     let image = canvas.export(ExportFormat::Svg)?;
//!     std::fs::write(image.file_name(), &image.bytes)?;
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod editor;
pub mod error;
pub mod export;
pub mod graph;
pub mod palette;
pub mod prelude;
pub mod upload;

pub use canvas::{CanvasController, Connection, Viewport};
pub use editor::LabelEditor;
pub use graph::GraphStore;
pub use palette::DragPayload;
pub use upload::RemoteUpload;
