//! # grid-overlay
//!
//! Grid line geometry for overlays on raster images.
//!
//! Give it two neighbouring reference lines per axis and the image size; it
//! extrapolates every parallel grid line and clips each one to the image.
//! The result is plain geometry (segments in pixel coordinates), ready for
//! any drawing backend.
//!
//! ```
//! use grid_overlay::{extrapolate_parallel_lines, Bounds, Point};
//!
//! let bounds = Bounds::new(10, 10).unwrap();
//! let lines = extrapolate_parallel_lines(
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 9.0),
//!     Point::new(5.0, 0.0),
//!     bounds,
//! )
//! .unwrap();
//! assert_eq!(lines.len(), 2);
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod clip;
pub mod error;
pub mod extrapolate;
pub mod geometry;
pub mod grid;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use clip::{clip_line_to_bounds, edge_crossings};
pub use error::{Axis, GridError};
pub use extrapolate::{extrapolate_parallel_lines, LineFamily, MAX_LINES_PER_AXIS};
pub use geometry::{Bounds, Direction, LineSet, Point, Segment};
pub use grid::{compute_axis, compute_grid, Grid, GridReferences};
pub use svg::{extract_grid_references_from_svg, SvgAnnotations, SvgError, HLINE_IDS, VLINE_IDS};
