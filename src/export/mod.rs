//! Rendering a diagram to downloadable image bytes.
//!
//! Export always frames the whole diagram: it measures the bounding box of every
//! node's footprint, pads it, and renders only the content layer (shapes, edges and
//! their labels) over an opaque background. Viewport pan and zoom play no part, so
//! content scrolled off screen is still included.

pub mod geometry;
pub mod options;
mod png;
mod svg;

pub use geometry::Rect;
pub use options::*;

use crate::error::ExportError;
use crate::graph::DiagramSnapshot;
use log::{info, warn};

/// An exported image, ready to be offered as a download or uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub format: ExportFormat,
    /// Output width; pixels for PNG, user units for SVG.
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    /// The suggested download name, e.g. `flowchart-export.png`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", EXPORT_FILE_STEM, self.format.extension())
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// The padded region an export of `snapshot` would capture, in diagram space.
pub fn capture_region(snapshot: &DiagramSnapshot, options: &ExportOptions) -> Option<Rect> {
    geometry::content_bounds(&snapshot.nodes).map(|bounds| bounds.inflate(options.padding))
}

/// Renders `snapshot` to PNG or SVG bytes.
///
/// Fails with [`ExportError::ExportFailed`] when there is no content to capture or the
/// rasterizer rejects the scene. The snapshot is never modified.
pub fn export_diagram(
    snapshot: &DiagramSnapshot,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<ExportedImage, ExportError> {
    let result = render(snapshot, format, options);
    match &result {
        Ok(image) => info!(
            "Exported {} ({}x{}, {} bytes)",
            image.file_name(),
            image.width,
            image.height,
            image.bytes.len()
        ),
        Err(e) => warn!("{}", e),
    }
    result
}

fn render(
    snapshot: &DiagramSnapshot,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<ExportedImage, ExportError> {
    options.validate()?;
    let region = capture_region(snapshot, options).ok_or_else(|| {
        ExportError::ExportFailed("the diagram has no content to capture".to_string())
    })?;
    let max_side = f64::from(u32::MAX);
    if !(region.width.is_finite() && region.height.is_finite())
        || region.width > max_side
        || region.height > max_side
    {
        return Err(ExportError::ExportFailed(format!(
            "capture region {}x{} is out of range",
            region.width, region.height
        )));
    }

    let scene = svg::render(snapshot, region, options);
    match format {
        ExportFormat::Svg => Ok(ExportedImage {
            format,
            width: scene.width,
            height: scene.height,
            bytes: scene.markup.into_bytes(),
        }),
        ExportFormat::Png => {
            let (bytes, width, height) =
                png::rasterize(&scene.markup, scene.width, scene.height, options)?;
            Ok(ExportedImage {
                format,
                width,
                height,
                bytes,
            })
        }
    }
}
