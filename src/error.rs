use crate::graph::NodeId;
use thiserror::Error;

/// Which end of an edge a node reference was meant to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Source,
    Target,
}

impl std::fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointRole::Source => write!(f, "source"),
            EndpointRole::Target => write!(f, "target"),
        }
    }
}

/// Errors raised by the graph store when a request would break its invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Edge {role} '{node_id}' does not reference a node in this diagram")]
    InvalidReference { node_id: NodeId, role: EndpointRole },
}

/// Errors that can occur while rendering the diagram to an image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("Export failed: {0}")]
    ExportFailed(String),
}

/// Errors reported by a remote upload backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    #[error("Upload of '{name}' failed: {reason}")]
    UploadFailed { name: String, reason: String },
}

/// Errors from the combined export-then-upload action.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PublishError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}
