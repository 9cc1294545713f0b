//! SVG import: pull fillable shapes out of an SVG document.
//!
//! Uses usvg to resolve CSS, `<use>`, basic shapes and transforms, then walks
//! the tree collecting one [`SvgShape`] per subpath. Curves are flattened
//! with lyon_geom so the hachure fill only ever sees straight edges.

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};
use thiserror::Error;

use crate::geometry::{Point, Polygon};

/// Errors from [`extract_shapes_from_svg`].
///
/// ## Rust Lesson #20: Error Handling
///
/// `thiserror` writes the `Display` and `std::error::Error` impls from the
/// `#[error(...)]` attributes. Callers propagate with `?`.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    Parse(String),
    #[error("no fillable shapes found in SVG")]
    NoShapes,
}

/// One closed outline taken from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgShape {
    pub polygon: Polygon,
    /// Element id, if the source element had one.
    pub id: Option<String>,
    /// Solid fill as `#rrggbb`. Gradients and patterns come through as `None`.
    pub fill: Option<String>,
    pub stroke_width: Option<f64>,
}

/// Flattening tolerance in user units.
const CURVE_TOLERANCE: f32 = 0.1;

/// Parse `svg_content` and return every subpath with at least three
/// distinct vertices, in document order, in absolute coordinates.
pub fn extract_shapes_from_svg(svg_content: &str) -> Result<Vec<SvgShape>, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options).map_err(|e| SvgError::Parse(e.to_string()))?;

    let mut shapes = Vec::new();
    collect_group(tree.root(), &mut shapes);
    tracing::debug!(count = shapes.len(), "extracted shapes from SVG");

    if shapes.is_empty() {
        Err(SvgError::NoShapes)
    } else {
        Ok(shapes)
    }
}

fn collect_group(group: &usvg::Group, shapes: &mut Vec<SvgShape>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => collect_group(group, shapes),
            usvg::Node::Path(path) => collect_path(path, shapes),
            // Text and images carry no outline to fill.
            _ => {}
        }
    }
}

fn collect_path(path: &usvg::Path, shapes: &mut Vec<SvgShape>) {
    let Some(data) = path.data().clone().transform(path.abs_transform()) else {
        tracing::debug!(id = path.id(), "skipping path with a degenerate transform");
        return;
    };

    let id = (!path.id().is_empty()).then(|| path.id().to_string());
    let fill = path.fill().and_then(|f| match f.paint() {
        usvg::Paint::Color(c) => Some(format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)),
        _ => None,
    });
    let stroke_width = path.stroke().map(|s| s.width().get() as f64);

    for points in flatten_subpaths(&data) {
        if points.len() < 3 {
            continue;
        }
        shapes.push(SvgShape {
            polygon: Polygon::new(points),
            id: id.clone(),
            fill: fill.clone(),
            stroke_width,
        });
    }
}

/// Split a path into vertex rings, one per `MoveTo`, flattening curves.
fn flatten_subpaths(data: &usvg::tiny_skia_path::Path) -> Vec<Vec<Point>> {
    use usvg::tiny_skia_path::PathSegment;

    let mut rings = Vec::new();
    let mut points: Vec<Point> = Vec::new();
    let mut last = (0.0f32, 0.0f32);

    let push = |points: &mut Vec<Point>, x: f32, y: f32| points.push(Point::new(x as f64, y as f64));

    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                if !points.is_empty() {
                    rings.push(std::mem::take(&mut points));
                }
                push(&mut points, p.x, p.y);
                last = (p.x, p.y);
            }
            PathSegment::LineTo(p) => {
                push(&mut points, p.x, p.y);
                last = (p.x, p.y);
            }
            PathSegment::QuadTo(ctrl, p) => {
                let curve = QuadraticBezierSegment {
                    from: point(last.0, last.1),
                    ctrl: point(ctrl.x, ctrl.y),
                    to: point(p.x, p.y),
                };
                curve.for_each_flattened(CURVE_TOLERANCE, &mut |s| push(&mut points, s.to.x, s.to.y));
                last = (p.x, p.y);
            }
            PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                let curve = CubicBezierSegment {
                    from: point(last.0, last.1),
                    ctrl1: point(ctrl1.x, ctrl1.y),
                    ctrl2: point(ctrl2.x, ctrl2.y),
                    to: point(p.x, p.y),
                };
                curve.for_each_flattened(CURVE_TOLERANCE, &mut |s| push(&mut points, s.to.x, s.to.y));
                last = (p.x, p.y);
            }
            // Polygons close implicitly.
            PathSegment::Close => {}
        }
    }
    if !points.is_empty() {
        rings.push(points);
    }

    for ring in &mut rings {
        ring.dedup_by(|a, b| (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);
        // A closing vertex equal to the first adds nothing to an implicit ring.
        if ring.len() > 1 && ring.first().zip(ring.last()).is_some_and(|(f, l)| f.distance(*l) < 1e-6) {
            ring.pop();
        }
    }
    rings
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_rect() {
        let svg = r##"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <rect id="box" x="10" y="10" width="80" height="80" fill="#ff8000"/>
            </svg>
        "##;

        let shapes = extract_shapes_from_svg(svg).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].polygon.len(), 4);
        assert_eq!(shapes[0].id.as_deref(), Some("box"));
        assert_eq!(shapes[0].fill.as_deref(), Some("#ff8000"));
        assert_eq!(shapes[0].stroke_width, None);
    }

    #[test]
    fn stroke_width_is_reported() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <polygon points="10,10 90,10 90,90" stroke="black" stroke-width="3" fill="none"/>
            </svg>
        "#;

        let shapes = extract_shapes_from_svg(svg).unwrap();
        assert_eq!(shapes[0].stroke_width, Some(3.0));
        assert_eq!(shapes[0].fill, None);
    }

    #[test]
    fn transforms_are_applied() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200">
                <g transform="translate(100 50)">
                    <rect x="0" y="0" width="10" height="10"/>
                </g>
            </svg>
        "#;

        let shapes = extract_shapes_from_svg(svg).unwrap();
        let bbox = shapes[0].polygon.bounding_box().unwrap();
        assert!((bbox.left - 100.0).abs() < 1e-4);
        assert!((bbox.top - 50.0).abs() < 1e-4);
    }

    #[test]
    fn each_subpath_is_its_own_shape() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <path d="M 0,0 L 10,0 L 10,10 Z M 20,20 L 30,20 L 30,30 Z"/>
            </svg>
        "#;

        let shapes = extract_shapes_from_svg(svg).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[1].polygon.points[0], Point::new(20.0, 20.0));
    }

    #[test]
    fn no_shapes_error() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"></svg>"#;
        assert!(matches!(extract_shapes_from_svg(svg), Err(SvgError::NoShapes)));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(extract_shapes_from_svg("not svg at all"), Err(SvgError::Parse(_))));
    }

    #[test]
    fn circle_is_flattened() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <circle cx="50" cy="50" r="40"/>
            </svg>
        "#;

        let shapes = extract_shapes_from_svg(svg).unwrap();
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].polygon.len() > 20, "got {} points", shapes[0].polygon.len());
    }
}
