use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PADDING: f64 = 50.0;
pub const DEFAULT_BACKGROUND: &str = "#0f172a";
pub const EXPORT_FILE_STEM: &str = "flowchart-export";
/// Largest PNG surface an export may allocate, in pixels (8192 x 8192).
pub const DEFAULT_MAX_PIXELS: u64 = 8192 * 8192;

/// The image formats a diagram can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            other => Err(format!("unsupported export format '{}'", other)),
        }
    }
}

/// Rendering settings for [`export_diagram`](super::export_diagram).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Space added on every side of the content bounding box.
    pub padding: f64,
    /// Opaque fill behind the diagram.
    pub background: String,
    pub edge_color: String,
    pub label_color: String,
    pub font_family: String,
    pub font_size: f64,
    /// Pixel density of PNG output relative to diagram units.
    pub png_scale: f32,
    /// Upper bound on `width * height` of a PNG export.
    pub max_pixels: u64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            background: DEFAULT_BACKGROUND.to_string(),
            edge_color: "#94a3b8".to_string(),
            label_color: "#ffffff".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            font_size: 14.0,
            png_scale: 1.0,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl ExportOptions {
    pub fn builder() -> ExportOptionsBuilder {
        ExportOptionsBuilder::default()
    }

    /// Checks the settings that would otherwise produce a broken or oversized image.
    pub fn validate(&self) -> Result<(), ExportError> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ExportError::ExportFailed(format!(
                "padding must be a non-negative number, got {}",
                self.padding
            )));
        }
        if !self.png_scale.is_finite() || self.png_scale <= 0.0 {
            return Err(ExportError::ExportFailed(format!(
                "PNG scale must be a positive number, got {}",
                self.png_scale
            )));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ExportError::ExportFailed(format!(
                "font size must be a positive number, got {}",
                self.font_size
            )));
        }
        if self.max_pixels == 0 {
            return Err(ExportError::ExportFailed(
                "pixel limit must be greater than zero".to_string(),
            ));
        }
        // The background must fully cover the image.
        if !is_opaque_hex(&self.background) {
            return Err(ExportError::ExportFailed(format!(
                "background must be an opaque #rgb or #rrggbb color, got '{}'",
                self.background
            )));
        }
        for (name, color) in [("edge", &self.edge_color), ("label", &self.label_color)] {
            if color.trim().is_empty() {
                return Err(ExportError::ExportFailed(format!("{} color is empty", name)));
            }
        }
        Ok(())
    }
}

fn is_opaque_hex(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Builder for [`ExportOptions`]; unset fields keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct ExportOptionsBuilder {
    options: ExportOptions,
}

impl ExportOptionsBuilder {
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.options.padding = padding;
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.options.background = color.into();
        self
    }

    pub fn with_edge_color(mut self, color: impl Into<String>) -> Self {
        self.options.edge_color = color.into();
        self
    }

    pub fn with_label_color(mut self, color: impl Into<String>) -> Self {
        self.options.label_color = color.into();
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.options.font_family = family.into();
        self.options.font_size = size;
        self
    }

    pub fn with_png_scale(mut self, scale: f32) -> Self {
        self.options.png_scale = scale;
        self
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.options.max_pixels = max_pixels;
        self
    }

    pub fn build(self) -> ExportOptions {
        self.options
    }

    /// Like [`build`](Self::build), but rejects settings an export would fail on.
    pub fn try_build(self) -> Result<ExportOptions, ExportError> {
        self.options.validate()?;
        Ok(self.options)
    }
}
