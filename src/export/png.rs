use super::options::ExportOptions;
use crate::error::ExportError;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;

/// Rasterizes a rendered SVG scene into PNG bytes at `options.png_scale`.
///
/// Returns the encoded image together with its pixel size. Surfaces larger than
/// `options.max_pixels` are refused before anything is allocated.
pub(super) fn rasterize(
    svg: &str,
    width: u32,
    height: u32,
    options: &ExportOptions,
) -> Result<(Vec<u8>, u32, u32), ExportError> {
    let scale = options.png_scale;
    let pixel_width = (f64::from(width) * f64::from(scale)).ceil().max(1.0);
    let pixel_height = (f64::from(height) * f64::from(scale)).ceil().max(1.0);
    if pixel_width * pixel_height > options.max_pixels as f64 {
        return Err(ExportError::ExportFailed(format!(
            "a {}x{} PNG exceeds the limit of {} pixels",
            pixel_width, pixel_height, options.max_pixels
        )));
    }
    let (pixel_width, pixel_height) = (pixel_width as u32, pixel_height as u32);

    let mut usvg_options = usvg::Options::default();
    usvg_options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &usvg_options).map_err(|e| {
        ExportError::ExportFailed(format!("could not parse rendered SVG: {}", e))
    })?;

    let mut pixmap = Pixmap::new(pixel_width, pixel_height).ok_or_else(|| {
        ExportError::ExportFailed(format!(
            "could not allocate a {}x{} surface",
            pixel_width, pixel_height
        ))
    })?;

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    let bytes = pixmap
        .encode_png()
        .map_err(|e| ExportError::ExportFailed(format!("could not encode PNG: {}", e)))?;
    Ok((bytes, pixel_width, pixel_height))
}
