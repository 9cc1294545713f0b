//! Segment relation classification.
//!
//! Decides how two line segments relate and, when they properly cross,
//! where. This is the HOT PATH of hachure filling: every scanline is
//! tested against every polygon edge.
//!
//! A false crossing corrupts the inside/outside pairing of a whole
//! scanline, so anything numerically borderline is reported as
//! `Disjoint`, `CollinearOverlap` or `TouchesEndpoint`, never `Intersects`.

use crate::geometry::{Line, Point};

/// Default tolerance, relative to segment lengths for the parallel test
/// and absolute on the `[0, 1]` segment parameters.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// How two segments relate.
///
/// ## Rust Lesson #10: Enums (Sum Types)
///
/// Only `Intersects` has a trustworthy crossing point, so the point is
/// returned alongside as an `Option` rather than stored on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRelation {
    /// No common point (including parallel, non-collinear segments).
    Disjoint,
    /// Collinear with overlapping extents. No single crossing point.
    CollinearOverlap,
    /// Meet only at (or within tolerance of) an endpoint of either segment.
    TouchesEndpoint,
    /// Cross strictly inside both segments.
    Intersects,
}

/// Classifier with a tunable tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentClassifier {
    pub epsilon: f64,
}

impl Default for SegmentClassifier {
    fn default() -> Self {
        Self { epsilon: DEFAULT_EPSILON }
    }
}

#[inline]
fn cross(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

impl SegmentClassifier {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon: epsilon.abs() }
    }

    /// Classify `a` against `b`.
    ///
    /// Solves `a.start + t·r = b.start + u·s` with the 2D cross product form.
    /// The returned point is `Some` only for [`SegmentRelation::Intersects`].
    pub fn classify(&self, a: &Line, b: &Line) -> (SegmentRelation, Option<Point>) {
        let eps = self.epsilon;

        let (rx, ry) = (a.x2 - a.x1, a.y2 - a.y1);
        let (sx, sy) = (b.x2 - b.x1, b.y2 - b.y1);
        let (qx, qy) = (b.x1 - a.x1, b.y1 - a.y1);

        let r_len = rx.hypot(ry);
        let s_len = sx.hypot(sy);
        if r_len == 0.0 || s_len == 0.0 {
            return (SegmentRelation::Disjoint, None);
        }

        let denom = cross(rx, ry, sx, sy);

        if denom.abs() <= eps * r_len * s_len {
            return (self.classify_parallel(rx, ry, sx, sy, qx, qy, r_len), None);
        }

        let t = cross(qx, qy, sx, sy) / denom;
        let u = cross(qx, qy, rx, ry) / denom;

        let outside = |v: f64| v < -eps || v > 1.0 + eps;
        if outside(t) || outside(u) {
            return (SegmentRelation::Disjoint, None);
        }

        let at_end = |v: f64| v <= eps || v >= 1.0 - eps;
        if at_end(t) || at_end(u) {
            return (SegmentRelation::TouchesEndpoint, None);
        }

        let point = Point::new(a.x1 + t * rx, a.y1 + t * ry);
        (SegmentRelation::Intersects, Some(point))
    }

    /// Parallel case: collinear overlap or nothing.
    #[allow(clippy::too_many_arguments)]
    fn classify_parallel(
        &self,
        rx: f64, ry: f64,
        sx: f64, sy: f64,
        qx: f64, qy: f64,
        r_len: f64,
    ) -> SegmentRelation {
        let eps = self.epsilon;
        let q_len = qx.hypot(qy);

        if cross(qx, qy, rx, ry).abs() > eps * q_len * r_len {
            return SegmentRelation::Disjoint;
        }

        // Project b's endpoints onto a's parameter line.
        let rr = rx * rx + ry * ry;
        let t0 = (qx * rx + qy * ry) / rr;
        let t1 = t0 + (sx * rx + sy * ry) / rr;
        let lo = t0.min(t1).max(0.0);
        let hi = t0.max(t1).min(1.0);

        if lo <= hi + eps {
            SegmentRelation::CollinearOverlap
        } else {
            SegmentRelation::Disjoint
        }
    }
}

/// Classify two segments with the default tolerance.
#[inline]
pub fn classify(a: &Line, b: &Line) -> (SegmentRelation, Option<Point>) {
    SegmentClassifier::default().classify(a, b)
}

// ============================================================================
// TESTS
// ============================================================================
