//! Core geometry types for grid-overlay.
//!
//! ## Rust Lesson #3: Operator Overloading
//!
//! In JS, `a + b` on two objects gives you `"[object Object][object Object]"`.
//! In Rust, implementing `std::ops::Add` for a type makes `a + b` call
//! your own `add` method. We use this so `Point` doubles as a tiny 2D vector:
//! no matrix library needed for dot products and rotations.

use std::ops::{Add, Mul, Neg, Sub};

use crate::error::GridError;

/// A 2D point (or vector) with x,y coordinates in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A unit-length direction vector.
///
/// Fields are private so the magnitude == 1 invariant can't be broken
/// after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    dx: f64,
    dy: f64,
}

/// Image rectangle in pixels.
///
/// Valid coordinates are `x ∈ [0, width-1]` and `y ∈ [0, height-1]`,
/// inclusive on both ends, matching pixel-index bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    width: u32,
    height: u32,
}

/// A line segment between two points, e.g. one grid line clipped to the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Grid lines of one axis, ordered by increasing offset along the axis normal.
pub type LineSet = Vec<Segment>;

// ============================================================================
// POINT / VECTOR MATH
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product, treating both points as vectors from the origin.
    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Rotate 90° counter-clockwise (in math orientation): `(x, y) -> (-y, x)`.
    #[inline]
    pub fn perp(self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Length of the vector.
    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, scale: f64) -> Point {
        Point::new(self.x * scale, self.y * scale)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

// ============================================================================
// DIRECTION
// ============================================================================

impl Direction {
    /// Normalize a vector into a direction.
    ///
    /// Fails for zero-length or non-finite vectors instead of producing NaNs.
    pub fn new(vector: Point) -> Result<Self, GridError> {
        if !vector.is_finite() {
            return Err(GridError::NonFiniteInput);
        }
        let length = vector.length();
        if length == 0.0 {
            return Err(GridError::DegenerateDirection);
        }
        Ok(Self {
            dx: vector.x / length,
            dy: vector.y / length,
        })
    }

    /// Direction pointing from `from` towards `to`.
    pub fn between(from: Point, to: Point) -> Result<Self, GridError> {
        Self::new(to - from)
    }

    #[inline]
    pub fn dx(self) -> f64 {
        self.dx
    }

    #[inline]
    pub fn dy(self) -> f64 {
        self.dy
    }

    /// The direction as a plain vector.
    #[inline]
    pub fn vector(self) -> Point {
        Point::new(self.dx, self.dy)
    }

    /// This direction rotated by 90°. Still unit length.
    #[inline]
    pub fn normal(self) -> Direction {
        Direction {
            dx: -self.dy,
            dy: self.dx,
        }
    }

    #[inline]
    pub fn reversed(self) -> Direction {
        Direction {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

// ============================================================================
// BOUNDS
// ============================================================================

impl Bounds {
    /// Create bounds for a `width` × `height` pixel image.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.height
    }

    /// Largest valid x coordinate (`width - 1`).
    #[inline]
    pub fn max_x(self) -> f64 {
        f64::from(self.width - 1)
    }

    /// Largest valid y coordinate (`height - 1`).
    #[inline]
    pub fn max_y(self) -> f64 {
        f64::from(self.height - 1)
    }

    /// The four corner pixels: top-left, bottom-left, top-right, bottom-right.
    pub fn corners(self) -> [Point; 4] {
        let (max_x, max_y) = (self.max_x(), self.max_y());
        [
            Point::new(0.0, 0.0),
            Point::new(0.0, max_y),
            Point::new(max_x, 0.0),
            Point::new(max_x, max_y),
        ]
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (0.0..=self.max_x()).contains(&p.x) && (0.0..=self.max_y()).contains(&p.y)
    }

    /// Whether the point lies on one of the four boundary lines.
    pub fn on_boundary(self, p: Point) -> bool {
        self.contains(p)
            && (p.x == 0.0 || p.x == self.max_x() || p.y == 0.0 || p.y == self.max_y())
    }
}

// ============================================================================
// SEGMENT
// ============================================================================

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        (self.start + self.end) * 0.5
    }
}

impl From<[[f64; 2]; 2]> for Segment {
    fn from([start, end]: [[f64; 2]; 2]) -> Self {
        Segment::new(start.into(), end.into())
    }
}

// ============================================================================
// TESTS
// ============================================================================
