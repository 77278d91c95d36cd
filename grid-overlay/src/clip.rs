//! Clipping infinite lines to the image rectangle.
//!
//! This is the HOT PATH: the extrapolator calls it once per candidate grid
//! line, and most calls are cheap rejections near the image border.

use crate::geometry::{Bounds, Direction, Point, Segment};

// ============================================================================
// EDGE CROSSINGS
// ============================================================================
//
// ## Rust Lesson #8: Arrays in for loops
//
// `for x_edge in [0.0, max_x]` iterates a fixed-size array by value.
// No allocation, no iterator adapter: the compiler unrolls it.

/// All points where the infinite line `center + t * direction` meets the
/// rectangle boundary.
///
/// Boundaries are tested in a fixed order: left (x = 0), right
/// (x = width-1), top (y = 0), bottom (y = height-1). A boundary parallel to
/// the line (zero direction component) is skipped rather than divided by.
/// An intersection is kept only if its other coordinate lies inside the
/// closed pixel range, so a line through a corner can report the same point
/// twice.
pub fn edge_crossings(center: Point, direction: Direction, bounds: Bounds) -> Vec<Point> {
    let (dx, dy) = (direction.dx(), direction.dy());
    let (max_x, max_y) = (bounds.max_x(), bounds.max_y());

    let mut points = Vec::with_capacity(4);

    if dx != 0.0 {
        for x_edge in [0.0, max_x] {
            let t = (x_edge - center.x) / dx;
            let y = center.y + t * dy;
            if (0.0..=max_y).contains(&y) {
                points.push(Point::new(x_edge, y));
            }
        }
    }

    if dy != 0.0 {
        for y_edge in [0.0, max_y] {
            let t = (y_edge - center.y) / dy;
            let x = center.x + t * dx;
            if (0.0..=max_x).contains(&x) {
                points.push(Point::new(x, y_edge));
            }
        }
    }

    points
}

// ============================================================================
// LINE CLIPPING
// ============================================================================

/// Clip the infinite line through `center` to the image rectangle.
///
/// Returns the first two boundary crossings in left/right/top/bottom order,
/// or `None` when the line misses the image. The start/end order follows that
/// fixed convention, not the sign of `direction`.
#[inline]
pub fn clip_line_to_bounds(center: Point, direction: Direction, bounds: Bounds) -> Option<Segment> {
    // ## Rust Lesson #9: Slice Patterns
    //
    // `[start, end, ..]` matches any slice with at least two elements
    // and binds the first two. Anything shorter falls through to `_`.
    match edge_crossings(center, direction, bounds).as_slice() {
        [start, end, ..] => Some(Segment::new(*start, *end)),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================
