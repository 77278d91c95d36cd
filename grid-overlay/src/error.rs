//! Error type for grid computation.
//!
//! Only caller mistakes are errors. A candidate grid line that misses the
//! image entirely is normal and shows up as `None` from the clipper.

use std::fmt;

/// Which family of grid lines an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Invalid input to the grid extrapolator.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The reference line's two points coincide.
    DegenerateDirection,
    /// The second reference line lies on the first one.
    ZeroSpacing,
    /// Image with zero width or height.
    InvalidBounds { width: u32, height: u32 },
    /// A coordinate was NaN or infinite.
    NonFiniteInput,
    /// The spacing is so small that covering the image needs an absurd line count.
    TooManyLines { requested: u64, limit: u64 },
    /// One axis of a grid failed.
    Axis { axis: Axis, source: Box<GridError> },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::DegenerateDirection => {
                write!(f, "reference line has zero length (start and end coincide)")
            }
            GridError::ZeroSpacing => {
                write!(f, "second reference line is colinear with the first (zero spacing)")
            }
            GridError::InvalidBounds { width, height } => {
                write!(f, "invalid image size {}x{}", width, height)
            }
            GridError::NonFiniteInput => write!(f, "coordinates must be finite numbers"),
            GridError::TooManyLines { requested, limit } => write!(
                f,
                "spacing too small: {} candidate lines exceeds limit of {}",
                requested, limit
            ),
            GridError::Axis { axis, source } => write!(f, "{} grid: {}", axis, source),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::Axis { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl GridError {
    /// Tag this error with the axis it came from.
    pub fn in_axis(self, axis: Axis) -> GridError {
        GridError::Axis {
            axis,
            source: Box::new(self),
        }
    }
}
