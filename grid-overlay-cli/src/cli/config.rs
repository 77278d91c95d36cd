//! Grid configuration files.
//!
//! A config is a YAML file naming the image (or its size), the two reference
//! lines per axis, and optional overlay styling.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use grid_overlay::{GridReferences, Segment};

/// A reference line as written in YAML: `[[x1, y1], [x2, y2]]`.
pub type LineSpec = [[f64; 2]; 2];

/// A complete grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Background image. Relative paths are resolved against the config file.
    #[serde(default)]
    pub image: Option<PathBuf>,

    /// Image width in pixels (required when no image is given)
    #[serde(default)]
    pub width: Option<u32>,

    /// Image height in pixels (required when no image is given)
    #[serde(default)]
    pub height: Option<u32>,

    /// Two neighbouring horizontal grid lines
    pub horizontal: [LineSpec; 2],

    /// Two neighbouring vertical grid lines
    pub vertical: [LineSpec; 2],

    /// Overlay styling
    #[serde(default)]
    pub style: OverlayStyle,
}

/// Style properties for the rendered overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    /// Stroke color of horizontal grid lines (any SVG color)
    #[serde(default = "default_horizontal_color")]
    pub horizontal_color: String,

    /// Stroke color of vertical grid lines (any SVG color)
    #[serde(default = "default_vertical_color")]
    pub vertical_color: String,

    /// Stroke width in pixels
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Draw the background image in grayscale
    #[serde(default)]
    pub grayscale: bool,
}

fn default_horizontal_color() -> String {
    "cyan".to_string()
}

fn default_vertical_color() -> String {
    "magenta".to_string()
}

fn default_stroke_width() -> f64 {
    0.5
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            horizontal_color: default_horizontal_color(),
            vertical_color: default_vertical_color(),
            stroke_width: default_stroke_width(),
            grayscale: false,
        }
    }
}

/// Overlay style with colors parsed and checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    pub horizontal_color: svgtypes::Color,
    pub vertical_color: svgtypes::Color,
    pub stroke_width: f64,
    pub grayscale: bool,
}

impl OverlayStyle {
    /// Parse colors and check the stroke width.
    pub fn resolve(&self) -> Result<ResolvedStyle, String> {
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(format!(
                "Stroke width must be a positive number, got {}",
                self.stroke_width
            ));
        }
        Ok(ResolvedStyle {
            horizontal_color: parse_color(&self.horizontal_color)?,
            vertical_color: parse_color(&self.vertical_color)?,
            stroke_width: self.stroke_width,
            grayscale: self.grayscale,
        })
    }
}

/// Parse any SVG color string (`cyan`, `#0ff`, `rgb(0, 255, 255)`, ...).
pub fn parse_color(text: &str) -> Result<svgtypes::Color, String> {
    svgtypes::Color::from_str(text.trim()).map_err(|e| format!("Invalid color '{}': {}", text, e))
}

impl GridConfig {
    /// Load a config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let mut config = Self::from_yaml(&content)?;

        if let (Some(image), Some(dir)) = (&config.image, path.parent()) {
            if image.is_relative() {
                config.image = Some(dir.join(image));
            }
        }

        Ok(config)
    }

    /// Parse a config from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| format!("Failed to parse config YAML: {}", e))
    }

    /// Reference lines as library types.
    pub fn references(&self) -> GridReferences {
        let [h0, h1] = self.horizontal;
        let [v0, v1] = self.vertical;
        GridReferences::new(
            [Segment::from(h0), Segment::from(h1)],
            [Segment::from(v0), Segment::from(v1)],
        )
    }
}
