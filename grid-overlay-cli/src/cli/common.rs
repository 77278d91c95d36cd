//! Common utilities shared across CLI commands.

use std::fs;
use std::path::PathBuf;

use log::debug;
use serde::Serialize;

use grid_overlay::{
    compute_grid, extract_grid_references_from_svg, Bounds, Grid, GridReferences, Segment,
};

use super::config::{GridConfig, OverlayStyle, ResolvedStyle};

/// Output format for generated lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Svg,
    Json,
}

/// Options shared by `lines` and `render`.
#[derive(Debug, Clone, Default)]
pub struct GridArgs {
    pub config: Option<String>,
    pub annotations: Option<String>,
    pub image: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub output: Option<String>,
    pub format: Option<OutputFormat>,
    pub h_color: Option<String>,
    pub v_color: Option<String>,
    pub stroke_width: Option<f64>,
    pub grayscale: bool,
    pub help: bool,
}

/// Everything a command needs once inputs are loaded.
#[derive(Debug, Clone)]
pub struct GridJob {
    pub references: GridReferences,
    pub bounds: Bounds,
    pub style: ResolvedStyle,
    pub image: Option<PathBuf>,
}

impl GridJob {
    /// Run the extrapolator for both axes.
    pub fn compute(&self) -> Result<Grid, String> {
        compute_grid(&self.references, self.bounds).map_err(|e| e.to_string())
    }
}

/// Parse command line options.
pub fn parse_grid_args(args: &[String]) -> Result<GridArgs, String> {
    let mut parsed = GridArgs::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-c" | "--config" => parsed.config = Some(take_value(args, &mut i, flag)?.to_string()),
            "--annotations" => {
                parsed.annotations = Some(take_value(args, &mut i, flag)?.to_string());
            }
            "-i" | "--image" => parsed.image = Some(take_value(args, &mut i, flag)?.to_string()),
            "-o" | "--output" => parsed.output = Some(take_value(args, &mut i, flag)?.to_string()),
            "--width" => parsed.width = Some(parse_number(flag, take_value(args, &mut i, flag)?)?),
            "--height" => parsed.height = Some(parse_number(flag, take_value(args, &mut i, flag)?)?),
            "--stroke-width" => {
                parsed.stroke_width = Some(parse_number(flag, take_value(args, &mut i, flag)?)?);
            }
            "--h-color" => parsed.h_color = Some(take_value(args, &mut i, flag)?.to_string()),
            "--v-color" => parsed.v_color = Some(take_value(args, &mut i, flag)?.to_string()),
            "-f" | "--format" => {
                parsed.format = Some(match take_value(args, &mut i, flag)?.to_lowercase().as_str() {
                    "json" => OutputFormat::Json,
                    "svg" => OutputFormat::Svg,
                    other => {
                        return Err(format!("Unknown format: {}. Use 'svg' or 'json'.", other));
                    }
                });
            }
            "--grayscale" => parsed.grayscale = true,
            "-h" | "--help" => parsed.help = true,
            unknown => return Err(format!("Unknown option: {}", unknown)),
        }
        i += 1;
    }

    Ok(parsed)
}

/// Advance past a flag and return its value.
fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn parse_number<T: std::str::FromStr>(flag: &str, text: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, text))
}

/// Load reference lines, bounds and style from the config or annotation file,
/// then apply command line overrides.
pub fn load_job(args: &GridArgs) -> Result<GridJob, String> {
    let (references, mut width, mut height, mut style, mut image) =
        match (&args.config, &args.annotations) {
            (Some(_), Some(_)) => {
                return Err("Use either --config or --annotations, not both".to_string());
            }
            (Some(path), None) => {
                let config = GridConfig::load(path)?;
                let references = config.references();
                (references, config.width, config.height, config.style, config.image)
            }
            (None, Some(path)) => {
                let content = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read annotations {}: {}", path, e))?;
                let annotations = extract_grid_references_from_svg(&content)
                    .map_err(|e| e.to_string())?;
                (
                    annotations.references,
                    Some(annotations.width),
                    Some(annotations.height),
                    OverlayStyle::default(),
                    None,
                )
            }
            (None, None) => {
                return Err("Reference lines required (use --config or --annotations)".to_string());
            }
        };

    if let Some(path) = &args.image {
        image = Some(PathBuf::from(path));
    }
    if args.width.is_some() {
        width = args.width;
    }
    if args.height.is_some() {
        height = args.height;
    }
    if let Some(color) = &args.h_color {
        style.horizontal_color = color.clone();
    }
    if let Some(color) = &args.v_color {
        style.vertical_color = color.clone();
    }
    if let Some(stroke_width) = args.stroke_width {
        style.stroke_width = stroke_width;
    }
    if args.grayscale {
        style.grayscale = true;
    }

    // The image decides the bounds when there is one.
    let (width, height) = match &image {
        Some(path) => {
            let (w, h) = image::image_dimensions(path)
                .map_err(|e| format!("Failed to read image {}: {}", path.display(), e))?;
            if (width.is_some() || height.is_some()) && (width, height) != (Some(w), Some(h)) {
                eprintln!(
                    "Warning: image {} is {}x{}, ignoring configured size",
                    path.display(),
                    w,
                    h
                );
            }
            (w, h)
        }
        None => match (width, height) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err("Image size required (use --image or --width/--height)".to_string()),
        },
    };

    let bounds = Bounds::new(width, height).map_err(|e| e.to_string())?;
    let style = style.resolve()?;
    debug!("job: {}x{} image={:?} style={:?}", width, height, image, style);

    Ok(GridJob {
        references,
        bounds,
        style,
        image,
    })
}

// ============================================================================
// SVG OUTPUT
// ============================================================================

/// SVG color syntax for a parsed color.
fn svg_color(color: svgtypes::Color) -> String {
    format!("rgb({},{},{})", color.red, color.green, color.blue)
}

/// Convert a grid to a standalone SVG overlay the size of the image.
///
/// Grid coordinates are pixel indices, so the whole overlay is shifted by
/// half a pixel: integer coordinates land on pixel centers.
pub fn grid_to_svg(grid: &Grid, bounds: Bounds, style: &ResolvedStyle) -> String {
    let (width, height) = (bounds.width(), bounds.height());

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<g transform="translate(0.5 0.5)" fill="none" stroke-width="{sw}">
"#,
        w = width,
        h = height,
        sw = style.stroke_width
    ));

    push_line_group(&mut svg, "horizontal", &grid.horizontal, style.horizontal_color);
    push_line_group(&mut svg, "vertical", &grid.vertical, style.vertical_color);

    svg.push_str("</g>\n</svg>\n");
    svg
}

fn push_line_group(svg: &mut String, id: &str, lines: &[Segment], color: svgtypes::Color) {
    svg.push_str(&format!(
        "<g id=\"{}\" stroke=\"{}\" stroke-opacity=\"{:.3}\">\n",
        id,
        svg_color(color),
        f64::from(color.alpha) / 255.0
    ));
    for line in lines {
        svg.push_str(&format!(
            "  <line x1=\"{:.3}\" y1=\"{:.3}\" x2=\"{:.3}\" y2=\"{:.3}\"/>\n",
            line.start.x, line.start.y, line.end.x, line.end.y
        ));
    }
    svg.push_str("</g>\n");
}

// ============================================================================
// JSON OUTPUT
// ============================================================================

/// A line in JSON output format.
#[derive(Serialize)]
pub struct JsonLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// JSON output with both axes.
#[derive(Serialize)]
pub struct JsonGrid {
    pub width: u32,
    pub height: u32,
    pub horizontal: Vec<JsonLine>,
    pub vertical: Vec<JsonLine>,
}

impl From<&Segment> for JsonLine {
    fn from(line: &Segment) -> Self {
        JsonLine {
            x1: line.start.x,
            y1: line.start.y,
            x2: line.end.x,
            y2: line.end.y,
        }
    }
}

/// Convert a grid to pretty-printed JSON.
pub fn grid_to_json(grid: &Grid, bounds: Bounds) -> Result<String, String> {
    let output = JsonGrid {
        width: bounds.width(),
        height: bounds.height(),
        horizontal: grid.horizontal.iter().map(JsonLine::from).collect(),
        vertical: grid.vertical.iter().map(JsonLine::from).collect(),
    };
    serde_json::to_string_pretty(&output).map_err(|e| format!("Failed to serialize JSON: {}", e))
}
