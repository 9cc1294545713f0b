//! Core geometry types for rough-canvas.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = duplicate the value (Copy only for small stack values)
//! - `PartialEq` = compare with `==`
//!
//! Everything here is a plain value type. Shapes are built, filled and
//! dropped inside a single draw call; nothing is kept between calls.

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
///
/// Used for polygon edges, hachure scanlines and the clipped chords
/// handed to the stroke renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// An implicitly closed polygon: the last vertex connects back to the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
}

/// Axis-aligned bounds in canvas orientation (y grows downward, so `top`
/// is the smaller y value).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a line from two points.
    #[inline]
    pub fn between(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Get the start point of the line.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the end point of the line.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Get the midpoint of the line.
    #[inline]
    pub fn midpoint(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Iterate over the edges, wrapping from the last vertex back to the first.
    ///
    /// A single-point polygon yields one zero-length edge.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        edges_of(&self.points)
    }

    /// Get the bounding box, or `None` for an empty polygon.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }
}

/// Edges of an implicitly closed vertex ring.
pub fn edges_of(points: &[Point]) -> impl Iterator<Item = Line> + '_ {
    let n = points.len();
    (0..n).map(move |i| Line::between(points[i], points[(i + 1) % n]))
}

impl BoundingBox {
    /// Min/max reduction over a point set.
    ///
    /// ## Rust Lesson #6: Option<T>
    ///
    /// There is no `null`: an empty slice has no bounds, so we say so with `None`
    /// and the caller has to deal with it.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;

        let mut bbox = BoundingBox {
            top: first.y,
            bottom: first.y,
            left: first.x,
            right: first.x,
        };
        for p in &points[1..] {
            bbox.left = bbox.left.min(p.x);
            bbox.right = bbox.right.max(p.x);
            bbox.top = bbox.top.min(p.y);
            bbox.bottom = bbox.bottom.max(p.y);
        }

        Some(bbox)
    }

    /// Grow the box by `margin` on every side.
    #[inline]
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            top: self.top - margin,
            bottom: self.bottom + margin,
            left: self.left - margin,
            right: self.right + margin,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Length of the box diagonal.
    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }

    /// Corners in order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }

    /// True when every side is a finite number.
    pub fn is_finite(&self) -> bool {
        self.top.is_finite() && self.bottom.is_finite() && self.left.is_finite() && self.right.is_finite()
    }
}

// ============================================================================
// TESTS
// ============================================================================
