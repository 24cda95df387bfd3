//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowboard
//! crate. Import it to get the store, the controller, export and upload without
//! naming each module.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowboard::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut store = GraphStore::new();
//! let a = store.create_node(NodeKind::Start, "Start", Position::new(0.0, 0.0));
//! let b = store.create_node(NodeKind::Process, "Work", Position::new(100.0, 100.0));
//! store.create_edge(&a, &b, None)?;
//!
//! let image = export_diagram(&store.snapshot(), ExportFormat::Png, &ExportOptions::default())?;
//! println!("{} is {}x{}", image.file_name(), image.width, image.height);
//! # Ok(())
//! # }
//! ```

// Diagram model and store
pub use crate::graph::{
    Deletion, DiagramSnapshot, Edge, EdgeId, ElementRef, GraphEvent, GraphStore, Node, NodeId,
    NodeKind, Position, SubscriptionId,
};

// Interaction
pub use crate::canvas::{CanvasController, Connection, RenameState, Viewport};
pub use crate::editor::LabelEditor;
pub use crate::palette::{DragPayload, Palette};

// Export and upload
pub use crate::export::{ExportFormat, ExportOptions, ExportedImage, export_diagram};
pub use crate::upload::{MockDriveUpload, RemoteUpload, UploadReceipt};

// Error types
pub use crate::error::{ExportError, GraphError, PublishError, UploadError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
