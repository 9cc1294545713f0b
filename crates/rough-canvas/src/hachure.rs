//! Hachure scanline generation.
//!
//! Produces the parallel candidate lines that a hachure fill clips to a
//! shape. Lines are generated lazily, one per `next()`, so a fill never
//! materializes the whole set.

use crate::geometry::{BoundingBox, Line, Point};

/// Below this |tan| the hachure runs horizontally.
const NEAR_HORIZONTAL_TAN: f64 = 1e-4;

/// Above this |tan| the hachure runs vertically.
const NEAR_VERTICAL_TAN: f64 = 1e4;

/// Upper bound on lines from one sweep.
pub const MAX_LINES: u64 = 1_000_000;

#[derive(Debug, Clone, Copy)]
enum Sweep {
    /// Horizontal lines stepping down in y.
    Horizontal,
    /// Vertical lines stepping right in x.
    Vertical,
    /// Lines along `dir`, stepping along `normal` from the box centre.
    Rotated {
        dir: Point,
        normal: Point,
        center: Point,
        half_length: f64,
    },
}

/// Lazy sequence of hachure lines covering a bounding box.
///
/// Lines are `gap` apart measured perpendicular to their direction and each
/// one spans the full box. The sequence is finite (at most [`MAX_LINES`]);
/// to start over, build a new iterator.
///
/// ## Rust Lesson #26: Implementing Iterator
///
/// Implement `next()` and you get `map`, `filter`, `count`, `collect`
/// and friends for free.
#[derive(Debug, Clone)]
pub struct HachureIterator {
    bbox: BoundingBox,
    gap: f64,
    sweep: Sweep,
    /// Offset of the first line along the sweep axis.
    start: f64,
    /// Index of the next line.
    index: u64,
    /// Number of lines in the sweep.
    count: u64,
}

impl HachureIterator {
    /// Build the generator for `bbox` with trig values of the hachure angle.
    ///
    /// `tan_angle` picks the regime: near-horizontal and near-vertical
    /// hachures step straight down the box height or across its width, any
    /// other angle sweeps a rotated frame. A non-positive or non-finite
    /// `gap` (or a non-finite box) yields an empty sequence.
    pub fn new(
        bbox: BoundingBox,
        gap: f64,
        sin_angle: f64,
        cos_angle: f64,
        tan_angle: f64,
    ) -> Self {
        let empty = Self {
            bbox,
            gap,
            sweep: Sweep::Horizontal,
            start: 0.0,
            index: 0,
            count: 0,
        };

        if !(gap.is_finite() && gap > 0.0) || !bbox.is_finite() {
            return empty;
        }

        let (sweep, lo, hi) = if tan_angle.abs() < NEAR_HORIZONTAL_TAN {
            (Sweep::Horizontal, bbox.top, bbox.bottom)
        } else if !tan_angle.is_finite() || tan_angle.abs() > NEAR_VERTICAL_TAN {
            (Sweep::Vertical, bbox.left, bbox.right)
        } else {
            let dir = Point::new(cos_angle, sin_angle);
            let normal = Point::new(-sin_angle, cos_angle);
            let center = bbox.center();

            // Sweep range: corners projected onto the normal, relative to the centre.
            let (lo, hi) = bbox
                .corners()
                .iter()
                .map(|c| (c.x - center.x) * normal.x + (c.y - center.y) * normal.y)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p), hi.max(p)));

            let sweep = Sweep::Rotated {
                dir,
                normal,
                center,
                half_length: bbox.diagonal(),
            };
            (sweep, lo, hi)
        };

        Self {
            sweep,
            start: lo,
            count: sweep_count(lo, hi, gap),
            ..empty
        }
    }

    /// Spacing between lines.
    pub fn gap(&self) -> f64 {
        self.gap
    }
}

impl Iterator for HachureIterator {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.index >= self.count {
            return None;
        }

        // Offsets are computed from the index, never accumulated.
        let p = self.start + self.index as f64 * self.gap;
        self.index += 1;

        let b = &self.bbox;
        let line = match self.sweep {
            Sweep::Horizontal => Line::new(b.left, p, b.right, p),
            Sweep::Vertical => Line::new(p, b.top, p, b.bottom),
            Sweep::Rotated { dir, normal, center, half_length } => {
                let base_x = center.x + normal.x * p;
                let base_y = center.y + normal.y * p;
                Line::new(
                    base_x - dir.x * half_length,
                    base_y - dir.y * half_length,
                    base_x + dir.x * half_length,
                    base_y + dir.y * half_length,
                )
            }
        };

        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.count - self.index).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

/// Number of offsets `lo + i * gap` with `lo + i * gap < hi`.
///
/// Zero when `gap` is too small to move `lo` at its magnitude, and capped
/// at [`MAX_LINES`].
fn sweep_count(lo: f64, hi: f64, gap: f64) -> u64 {
    if lo >= hi {
        return 0;
    }
    if lo + gap == lo || hi - gap == hi {
        tracing::debug!(lo, hi, gap, "hachure gap below float resolution, no lines");
        return 0;
    }

    let count = ((hi - lo) / gap).ceil();
    if count > MAX_LINES as f64 {
        tracing::debug!(count, max = MAX_LINES, "hachure sweep capped");
        return MAX_LINES;
    }
    count as u64
}

// ============================================================================
// TESTS
// ============================================================================
