//! SVG annotation input - read reference lines drawn over a frame.
//!
//! The expected workflow: open the camera frame in a vector editor, draw two
//! lines along neighbouring horizontal grid lines and two along neighbouring
//! vertical ones, give them the ids below and save. usvg resolves CSS,
//! transforms and `<line>`/`<polyline>` shapes into plain paths for us.
//!
//! Lines must be visible (stroked) or usvg drops them while simplifying.

use std::collections::HashMap;

use crate::error::GridError;
use crate::geometry::{Bounds, Point, Segment};
use crate::grid::GridReferences;

/// Element ids of the two horizontal reference lines.
pub const HLINE_IDS: [&str; 2] = ["hline-0", "hline-1"];

/// Element ids of the two vertical reference lines.
pub const VLINE_IDS: [&str; 2] = ["vline-0", "vline-1"];

/// Error type for SVG annotation parsing.
#[derive(Debug)]
pub enum SvgError {
    ParseError(String),
    MissingLine(String),
}

impl std::fmt::Display for SvgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SvgError::ParseError(msg) => write!(f, "SVG parse error: {}", msg),
            SvgError::MissingLine(id) => {
                write!(f, "No visible line with id \"{}\" found in SVG", id)
            }
        }
    }
}

impl std::error::Error for SvgError {}

/// Reference lines plus the annotated image size.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgAnnotations {
    pub references: GridReferences,
    /// Document width, rounded to whole pixels.
    pub width: u32,
    /// Document height, rounded to whole pixels.
    pub height: u32,
}

impl SvgAnnotations {
    /// Image bounds from the document size.
    pub fn bounds(&self) -> Result<Bounds, GridError> {
        Bounds::new(self.width, self.height)
    }
}

/// Extract the four reference lines from an annotated SVG.
pub fn extract_grid_references_from_svg(svg_content: &str) -> Result<SvgAnnotations, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| SvgError::ParseError(e.to_string()))?;

    let mut lines = HashMap::new();
    collect_lines(tree.root(), None, &mut lines);

    let take = |id: &str| {
        lines
            .get(id)
            .copied()
            .ok_or_else(|| SvgError::MissingLine(id.to_string()))
    };

    let references = GridReferences::new(
        [take(HLINE_IDS[0])?, take(HLINE_IDS[1])?],
        [take(VLINE_IDS[0])?, take(VLINE_IDS[1])?],
    );

    let size = tree.size();
    Ok(SvgAnnotations {
        references,
        width: size.width().round() as u32,
        height: size.height().round() as u32,
    })
}

/// Walk the tree collecting `id -> endpoints` for every path.
///
/// A path without its own id inherits the id of its closest named group,
/// since usvg may hoist an element's id onto the group it wraps it in.
fn collect_lines<'a>(
    group: &'a usvg::Group,
    inherited_id: Option<&'a str>,
    lines: &mut HashMap<String, Segment>,
) {
    let group_id = if group.id().is_empty() {
        inherited_id
    } else {
        Some(group.id())
    };

    for child in group.children() {
        match child {
            usvg::Node::Group(inner) => collect_lines(inner, group_id, lines),
            usvg::Node::Path(path) => {
                let id = if path.id().is_empty() {
                    group_id
                } else {
                    Some(path.id())
                };
                if let (Some(id), Some(segment)) = (id, path_endpoints(path)) {
                    lines.entry(id.to_string()).or_insert(segment);
                }
            }
            _ => {}
        }
    }
}

/// First and last vertex of a path, in document coordinates.
fn path_endpoints(path: &usvg::Path) -> Option<Segment> {
    let mut points = path.data().points().to_vec();
    if points.len() < 2 {
        return None;
    }
    path.abs_transform().map_points(&mut points);

    let first = points.first()?;
    let last = points.last()?;
    Some(Segment::new(
        Point::new(f64::from(first.x), f64::from(first.y)),
        Point::new(f64::from(last.x), f64::from(last.y)),
    ))
}

// ============================================================================
// TESTS
// ============================================================================
