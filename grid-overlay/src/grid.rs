//! Two-axis grid: one line family per axis.

use log::debug;

use crate::error::{Axis, GridError};
use crate::extrapolate::extrapolate_parallel_lines;
use crate::geometry::{Bounds, LineSet, Segment};

/// Two neighbouring reference lines per axis.
///
/// For each axis, the first line sets the direction and the start of the
/// second line sets the spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridReferences {
    pub horizontal: [Segment; 2],
    pub vertical: [Segment; 2],
}

/// Computed grid lines, clipped to the image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    pub horizontal: LineSet,
    pub vertical: LineSet,
}

impl GridReferences {
    pub fn new(horizontal: [Segment; 2], vertical: [Segment; 2]) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Reference pair for one axis.
    pub fn axis(&self, axis: Axis) -> &[Segment; 2] {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }
}

impl Grid {
    /// Lines of one axis.
    pub fn axis(&self, axis: Axis) -> &LineSet {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    /// Total number of lines on both axes.
    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }
}

/// Extrapolate one axis from its reference pair.
pub fn compute_axis(references: &[Segment; 2], bounds: Bounds) -> Result<LineSet, GridError> {
    let [first, second] = references;
    extrapolate_parallel_lines(first.start, first.end, second.start, bounds)
}

/// Compute both grid axes for an image of the given size.
///
/// An invalid reference pair fails the whole grid; the error names the axis.
pub fn compute_grid(references: &GridReferences, bounds: Bounds) -> Result<Grid, GridError> {
    let horizontal = compute_axis(&references.horizontal, bounds)
        .map_err(|e| e.in_axis(Axis::Horizontal))?;
    let vertical = compute_axis(&references.vertical, bounds)
        .map_err(|e| e.in_axis(Axis::Vertical))?;

    debug!(
        "grid {}x{}: {} horizontal, {} vertical lines",
        bounds.width(),
        bounds.height(),
        horizontal.len(),
        vertical.len()
    );

    Ok(Grid {
        horizontal,
        vertical,
    })
}
