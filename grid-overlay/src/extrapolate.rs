//! Parallel grid line generation from two reference lines.
//!
//! One reference line gives the direction, a point on the neighbouring line
//! gives the spacing. From those we lay out every parallel line that can
//! touch the image and clip each one to the image edges.

use std::ops::RangeInclusive;

use log::debug;

use crate::clip::clip_line_to_bounds;
use crate::error::GridError;
use crate::geometry::{Bounds, Direction, LineSet, Point};

/// Upper bound on candidate lines per axis.
pub const MAX_LINES_PER_AXIS: u64 = 100_000;

/// One family of equally spaced parallel lines.
///
/// Line `i` passes through `origin + i * spacing * normal`. The normal is
/// oriented so that `spacing` is always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFamily {
    origin: Point,
    direction: Direction,
    normal: Direction,
    spacing: f64,
}

impl LineFamily {
    /// Derive a family from a reference line `start1 -> end1` and a point
    /// `start2` on the adjacent line.
    pub fn from_reference(start1: Point, end1: Point, start2: Point) -> Result<Self, GridError> {
        if !(start1.is_finite() && end1.is_finite() && start2.is_finite()) {
            return Err(GridError::NonFiniteInput);
        }

        let direction = Direction::between(start1, end1)?;
        let mut normal = direction.normal();
        let mut spacing = (start2 - start1).dot(normal.vector());

        // Keep spacing positive; flip the normal to match.
        if spacing < 0.0 {
            spacing = -spacing;
            normal = normal.reversed();
        }
        if spacing == 0.0 {
            return Err(GridError::ZeroSpacing);
        }

        Ok(Self {
            origin: start1,
            direction,
            normal,
            spacing,
        })
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn normal(&self) -> Direction {
        self.normal
    }

    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Range of signed distances (along the normal, from the origin) that
    /// the image corners span.
    pub fn offset_range(&self, bounds: Bounds) -> (f64, f64) {
        let normal = self.normal.vector();
        bounds
            .corners()
            .iter()
            .map(|corner| (*corner - self.origin).dot(normal))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), offset| {
                (lo.min(offset), hi.max(offset))
            })
    }

    /// Indices of every line that could cross the image.
    ///
    /// `floor(min / spacing) ..= ceil(max / spacing)`, so the range can run
    /// one line past each side of the image. Those lines clip to nothing.
    pub fn index_range(&self, bounds: Bounds) -> Result<RangeInclusive<i64>, GridError> {
        let (min_offset, max_offset) = self.offset_range(bounds);
        let lowest = (min_offset / self.spacing).floor();
        let highest = (max_offset / self.spacing).ceil();

        let count = highest - lowest + 1.0;
        if count.is_nan() || count > MAX_LINES_PER_AXIS as f64 {
            return Err(GridError::TooManyLines {
                requested: count as u64,
                limit: MAX_LINES_PER_AXIS,
            });
        }

        Ok(lowest as i64..=highest as i64)
    }

    /// A point on line `index`.
    #[inline]
    pub fn line_through(&self, index: i64) -> Point {
        self.origin + self.normal.vector() * (index as f64 * self.spacing)
    }

    /// Every line of the family that is visible in `bounds`, clipped to it.
    pub fn clip_to(&self, bounds: Bounds) -> Result<LineSet, GridError> {
        let indices = self.index_range(bounds)?;
        debug!(
            "line family: spacing={:.3} normal=({:.4}, {:.4}) indices={}..={}",
            self.spacing,
            self.normal.dx(),
            self.normal.dy(),
            indices.start(),
            indices.end()
        );

        let candidates = indices.end() - indices.start() + 1;

        // ## Rust Lesson #10: filter_map
        //
        // The clipper returns Option<Segment>. filter_map keeps the Some
        // values and silently drops the None ones: lines that miss the
        // image aren't errors, they just aren't drawn.
        let lines: LineSet = indices
            .filter_map(|i| clip_line_to_bounds(self.line_through(i), self.direction, bounds))
            .collect();

        debug!("kept {} of {} candidate lines", lines.len(), candidates);
        Ok(lines)
    }
}

/// Generate parallel lines from `start1 -> end1`, spaced by the offset of
/// `start2`, clipped exactly to the image edges.
///
/// Lines are ordered by increasing offset along the family normal.
pub fn extrapolate_parallel_lines(
    start1: Point,
    end1: Point,
    start2: Point,
    bounds: Bounds,
) -> Result<LineSet, GridError> {
    LineFamily::from_reference(start1, end1, start2)?.clip_to(bounds)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square10() -> Bounds {
        Bounds::new(10, 10).unwrap()
    }

    #[test]
    fn vertical_reference_grid() {
        let lines = extrapolate_parallel_lines(
            Point::new(0.0, 0.0),
            Point::new(0.0, 9.0),
            Point::new(5.0, 0.0),
            square10(),
        )
        .unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].start, Point::new(0.0, 0.0));
        assert_eq!(lines[0].end, Point::new(0.0, 9.0));
        assert_eq!(lines[1].start, Point::new(5.0, 0.0));
        assert_eq!(lines[1].end, Point::new(5.0, 9.0));
    }

    #[test]
    fn spacing_and_normal_are_positive_oriented() {
        let family = LineFamily::from_reference(
            Point::new(0.0, 0.0),
            Point::new(0.0, 9.0),
            Point::new(5.0, 0.0),
        )
        .unwrap();
        assert_eq!(family.spacing(), 5.0);
        assert_eq!(family.normal().vector(), Point::new(1.0, 0.0));
        assert_eq!(family.index_range(square10()).unwrap(), 0..=2);
    }

    #[test]
    fn second_line_on_other_side_reverses_order() {
        let family = LineFamily::from_reference(
            Point::new(0.0, 0.0),
            Point::new(0.0, 9.0),
            Point::new(-5.0, 0.0),
        )
        .unwrap();
        assert_eq!(family.spacing(), 5.0);
        assert_eq!(family.normal().vector(), Point::new(-1.0, 0.0));

        let lines = family.clip_to(square10()).unwrap();
        let xs: Vec<f64> = lines.iter().map(|l| l.start.x).collect();
        assert_eq!(xs, vec![5.0, 0.0]);
    }

    #[test]
    fn reference_outside_image() {
        let bounds = Bounds::new(100, 100).unwrap();
        let lines = extrapolate_parallel_lines(
            Point::new(-50.0, -50.0),
            Point::new(-50.0, 0.0),
            Point::new(-30.0, 7.0),
            bounds,
        )
        .unwrap();

        let xs: Vec<f64> = lines.iter().map(|l| l.start.x).collect();
        assert_eq!(xs, vec![10.0, 30.0, 50.0, 70.0, 90.0]);
        for line in &lines {
            assert_eq!(line.start.y, 0.0);
            assert_eq!(line.end.y, 99.0);
        }
    }

    #[test]
    fn slanted_lines_are_parallel_and_evenly_spaced() {
        let bounds = Bounds::new(640, 480).unwrap();
        let start1 = Point::new(12.0, 40.0);
        let end1 = Point::new(630.0, 52.0);
        let start2 = Point::new(12.0, 88.0);

        let family = LineFamily::from_reference(start1, end1, start2).unwrap();
        let lines = family.clip_to(bounds).unwrap();
        assert!(lines.len() >= 9, "expected about 10 lines, got {}", lines.len());

        let d = family.direction().vector();
        let n = family.normal().vector();
        for line in &lines {
            assert!(bounds.on_boundary(line.start));
            assert!(bounds.on_boundary(line.end));
            let along = line.end - line.start;
            let cross = along.x * d.y - along.y * d.x;
            assert!(cross.abs() < 1e-6, "line not parallel: {:?}", line);
        }

        for pair in lines.windows(2) {
            let gap = (pair[1].start - pair[0].start).dot(n);
            assert!((gap - family.spacing()).abs() < 1e-6, "gap {}", gap);
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let bounds = Bounds::new(320, 200).unwrap();
        let run = || {
            extrapolate_parallel_lines(
                Point::new(3.0, 7.0),
                Point::new(250.0, 33.0),
                Point::new(1.0, 29.5),
                bounds,
            )
            .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn coincident_points_rejected() {
        let p = Point::new(3.0, 3.0);
        let result = extrapolate_parallel_lines(p, p, Point::new(5.0, 0.0), square10());
        assert_eq!(result, Err(GridError::DegenerateDirection));
    }

    #[test]
    fn colinear_second_line_rejected() {
        let result = extrapolate_parallel_lines(
            Point::new(0.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(8.0, 8.0),
            square10(),
        );
        assert_eq!(result, Err(GridError::ZeroSpacing));
    }

    #[test]
    fn non_finite_points_rejected() {
        let result = extrapolate_parallel_lines(
            Point::new(0.0, 0.0),
            Point::new(0.0, 9.0),
            Point::new(f64::NAN, 0.0),
            square10(),
        );
        assert_eq!(result, Err(GridError::NonFiniteInput));
    }

    #[test]
    fn tiny_spacing_rejected() {
        let result = extrapolate_parallel_lines(
            Point::new(0.0, 0.0),
            Point::new(0.0, 9.0),
            Point::new(1e-6, 0.0),
            Bounds::new(100, 100).unwrap(),
        );
        assert!(
            matches!(result, Err(GridError::TooManyLines { limit: MAX_LINES_PER_AXIS, .. })),
            "got {:?}",
            result
        );
    }
}
