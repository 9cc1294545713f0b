//! Hachure fill orchestration.
//!
//! bounding box → scanlines → clip against every edge → pair crossings
//! into chords → sketchy strokes.
//!
//! Pairing crossings 0-1, 2-3, … assumes the scanline alternates
//! outside/inside along its length, which holds for simple
//! (non-self-intersecting) polygons.

use crate::geometry::{BoundingBox, Line, Point, edges_of};
use crate::hachure::HachureIterator;
use crate::rng::RandomSource;
use crate::segment::{SegmentClassifier, SegmentRelation};
use crate::sketchy::{RenderConfig, draw_sketchy_line, hachure_trig};
use crate::surface::{DrawingSurface, StyleScope};

/// Margin added around the shape before scanning so scanlines never
/// graze the outermost vertices.
const SCAN_MARGIN: f64 = 1.0;

/// All crossings of `line` with the polygon boundary, sorted along the
/// line from its start.
///
/// A proper [`SegmentRelation::Intersects`] adds its point. A polygon
/// vertex on the line follows the half-open rule: each edge ending there
/// adds the vertex once if its other end lies strictly on the positive side
/// of the line. A vertex where the boundary passes through therefore counts
/// once, and a vertex where it only touches counts zero or two times. Edges
/// running along the line add nothing themselves.
pub fn scanline_intersections(
    line: &Line,
    points: &[Point],
    classifier: &SegmentClassifier,
) -> Vec<Point> {
    let mut crossings: Vec<(Point, f64)> = edges_of(points)
        .filter_map(|edge| match classifier.classify(line, &edge) {
            (SegmentRelation::Intersects, Some(p)) => Some(p),
            (SegmentRelation::TouchesEndpoint, _) => vertex_crossing(line, &edge, classifier.epsilon),
            _ => None,
        })
        .map(|p| (p, position_along(line, p)))
        .collect();

    crossings.sort_by(|a, b| a.1.total_cmp(&b.1));
    crossings.into_iter().map(|(p, _)| p).collect()
}

/// The endpoint of `edge` lying on `line`, if the edge leaves it towards
/// the positive side.
///
/// `None` when the touch is at an end of `line` instead of at a vertex.
fn vertex_crossing(line: &Line, edge: &Line, epsilon: f64) -> Option<Point> {
    let side_start = side_of(line, edge.start());
    let side_end = side_of(line, edge.end());
    if side_start == side_end {
        return None;
    }

    // Where along the edge it meets the line's supporting line.
    let u = side_start / (side_start - side_end);
    let (vertex, other_side) = if u.abs() <= epsilon {
        (edge.start(), side_end)
    } else if (u - 1.0).abs() <= epsilon {
        (edge.end(), side_start)
    } else {
        return None;
    };

    (other_side > 0.0).then_some(vertex)
}

/// Signed area of `line` and `p`: positive on one side, negative on the other.
#[inline]
fn side_of(line: &Line, p: Point) -> f64 {
    (line.x2 - line.x1) * (p.y - line.y1) - (line.y2 - line.y1) * (p.x - line.x1)
}

/// Parameter of `p` along `line`, measured on the dominant axis.
#[inline]
fn position_along(line: &Line, p: Point) -> f64 {
    let dx = line.x2 - line.x1;
    let dy = line.y2 - line.y1;
    if dx.abs() > dy.abs() {
        (p.x - line.x1) / dx
    } else if dy != 0.0 {
        (p.y - line.y1) / dy
    } else {
        0.0
    }
}

/// Clip hachure scanlines to a polygon and return the interior chords.
///
/// `gap` is used as given (callers resolve and clamp it first). Empty input
/// gives no chords.
pub fn hachure_chords(points: &[Point], gap: f64, angle_degrees: f64, epsilon: f64) -> Vec<Line> {
    let Some(bbox) = BoundingBox::from_points(points) else {
        return Vec::new();
    };

    let classifier = SegmentClassifier::new(epsilon);
    let (sin, cos, tan) = hachure_trig(angle_degrees);
    let scanlines = HachureIterator::new(bbox.expand(SCAN_MARGIN), gap, sin, cos, tan);

    let mut chords = Vec::new();
    let mut scanned = 0usize;
    let mut unmatched = 0usize;

    for scanline in scanlines {
        scanned += 1;
        let crossings = scanline_intersections(&scanline, points, &classifier);

        // ## Rust Lesson #14: chunks_exact
        //
        // .chunks_exact(2) yields [p0, p1], [p2, p3], ... and leaves any odd
        // element in .remainder() instead of handing out a short chunk.
        let pairs = crossings.chunks_exact(2);
        unmatched += pairs.remainder().len();
        // A vertex the boundary only touches pairs with itself.
        chords.extend(
            pairs
                .filter(|pair| pair[0] != pair[1])
                .map(|pair| Line::between(pair[0], pair[1])),
        );
    }

    if unmatched > 0 {
        tracing::debug!(unmatched, "dropped unpaired scanline crossings");
    }
    tracing::debug!(scanlines = scanned, chords = chords.len(), gap, angle_degrees, "hachure chords");

    chords
}

/// Hachure-fill a polygon onto `surface` with sketchy strokes.
///
/// Gap and fill weight are resolved against the surface's current line
/// width. While drawing, the surface strokes with its fill style at the
/// fill weight; its previous style is restored afterwards on every path.
/// An empty polygon is a no-op and touches nothing.
pub fn hachure_fill<S, R>(surface: &mut S, points: &[Point], config: &RenderConfig, rng: &mut R)
where
    S: DrawingSurface + ?Sized,
    R: RandomSource + ?Sized,
{
    if points.is_empty() {
        return;
    }

    let line_width = surface.line_width();
    let gap = config.resolved_gap(line_width);
    let weight = config.resolved_fill_weight(line_width);

    let chords = hachure_chords(points, gap, config.hachure_angle, config.intersection_epsilon);

    let mut scope = StyleScope::new(surface);
    let fill = scope.fill_style().to_owned();
    scope.set_stroke_style(&fill);
    scope.set_line_width(weight);

    for chord in &chords {
        draw_sketchy_line(&mut *scope, chord.x1, chord.y1, chord.x2, chord.y2, config, rng);
    }
}

// ============================================================================
// TESTS
// ============================================================================
