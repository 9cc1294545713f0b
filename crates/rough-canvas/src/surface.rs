//! The drawing surface the sketch engine renders onto.
//!
//! The engine never rasterizes anything itself. It needs exactly this
//! capability set from whatever sits underneath: path primitives
//! (`move_to`, `bezier_curve_to`), a style stack (`save`/`restore`) and the
//! stroke/fill style and line width registers.
//!
//! [`SvgSurface`] is the bundled implementation: it records subpaths with
//! the style in effect and writes them out as SVG, which any SVG renderer
//! (resvg in the CLI) can turn into pixels.

use std::fmt::Write as _;
use std::ops::{Deref, DerefMut};

use lyon_geom::{CubicBezierSegment, point};

use crate::geometry::{BoundingBox, Point};

/// Capability set consumed by the fill orchestrator and stroke renderer.
///
/// Styles are CSS colour strings, the way a 2D canvas context stores them.
pub trait DrawingSurface {
    /// Start a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    /// Cubic Bézier from the current point to `(x, y)`.
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);

    /// Push the current style registers.
    fn save(&mut self);

    /// Pop the style registers pushed by the matching `save`.
    fn restore(&mut self);

    fn stroke_style(&self) -> &str;
    fn set_stroke_style(&mut self, style: &str);

    fn fill_style(&self) -> &str;
    fn set_fill_style(&mut self, style: &str);

    fn line_width(&self) -> f64;
    fn set_line_width(&mut self, width: f64);
}

/// Scoped `save`/`restore` around a borrowed surface.
///
/// ## Rust Lesson #25: RAII Guards
///
/// `restore` runs in `Drop`, so it happens on every way out of the scope:
/// normal return, early `return`, or `?`. No `finally` block needed.
pub struct StyleScope<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawingSurface + ?Sized> StyleScope<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawingSurface + ?Sized> Deref for StyleScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> DerefMut for StyleScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> Drop for StyleScope<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

// ============================================================================
// SVG SURFACE
// ============================================================================

/// The style registers of a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub stroke_style: String,
    pub fill_style: String,
    pub line_width: f64,
}

impl Default for Style {
    /// Canvas defaults: black stroke and fill, 1 unit wide.
    fn default() -> Self {
        Self {
            stroke_style: "#000000".to_string(),
            fill_style: "#000000".to_string(),
            line_width: 1.0,
        }
    }
}

/// A recorded subpath: a start point and the curves chained from it,
/// drawn with the style that was active at its `move_to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub stroke_style: String,
    pub line_width: f64,
    pub start: Point,
    pub curves: Vec<CubicBezierSegment<f64>>,
}

impl Subpath {
    /// Where the next curve would start.
    fn cursor(&self) -> Point {
        match self.curves.last() {
            Some(curve) => Point::new(curve.to.x, curve.to.y),
            None => self.start,
        }
    }
}

/// In-memory surface that renders to an SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    style: Style,
    stack: Vec<Style>,
    subpaths: Vec<Subpath>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface with the given initial style registers.
    pub fn with_style(style: Style) -> Self {
        Self { style, ..Self::default() }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn into_subpaths(self) -> Vec<Subpath> {
        self.subpaths
    }

    /// Total number of recorded curves.
    pub fn curve_count(&self) -> usize {
        self.subpaths.iter().map(|s| s.curves.len()).sum()
    }

    /// Bounds of every recorded start, control and end point.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let points: Vec<Point> = self
            .subpaths
            .iter()
            .flat_map(|s| {
                std::iter::once(s.start).chain(s.curves.iter().flat_map(|c| {
                    [c.ctrl1, c.ctrl2, c.to].map(|p| Point::new(p.x, p.y))
                }))
            })
            .collect();
        BoundingBox::from_points(&points)
    }

    /// Render the recorded subpaths as a standalone SVG document.
    ///
    /// Consecutive subpaths with the same stroke style and width share a
    /// `<g>` element. Subpaths without curves are skipped.
    pub fn to_svg(&self, view_box: &str) -> String {
        // Writing to a String cannot fail, so write! results are ignored.
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}">
"#,
            escape_attr(view_box)
        );

        let mut open_group: Option<(&str, f64)> = None;

        for subpath in self.subpaths.iter().filter(|s| !s.curves.is_empty()) {
            let key = (subpath.stroke_style.as_str(), subpath.line_width);
            if open_group != Some(key) {
                if open_group.is_some() {
                    svg.push_str("</g>\n");
                }
                let _ = writeln!(
                    svg,
                    "<g stroke=\"{}\" stroke-width=\"{}\" fill=\"none\" stroke-linecap=\"round\">",
                    escape_attr(key.0),
                    key.1
                );
                open_group = Some(key);
            }

            let _ = write!(svg, "  <path d=\"M{:.2},{:.2}", subpath.start.x, subpath.start.y);
            for c in &subpath.curves {
                let _ = write!(
                    svg,
                    " C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
                    c.ctrl1.x, c.ctrl1.y, c.ctrl2.x, c.ctrl2.y, c.to.x, c.to.y
                );
            }
            svg.push_str("\"/>\n");
        }

        if open_group.is_some() {
            svg.push_str("</g>\n");
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl DrawingSurface for SvgSurface {
    fn move_to(&mut self, x: f64, y: f64) {
        self.subpaths.push(Subpath {
            stroke_style: self.style.stroke_style.clone(),
            line_width: self.style.line_width,
            start: Point::new(x, y),
            curves: Vec::new(),
        });
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        // Like a canvas context: a curve with no current point starts at its
        // first control point.
        if self.subpaths.is_empty() {
            self.move_to(cp1x, cp1y);
        }
        let Some(subpath) = self.subpaths.last_mut() else {
            return;
        };
        let from = subpath.cursor();
        subpath.curves.push(CubicBezierSegment {
            from: point(from.x, from.y),
            ctrl1: point(cp1x, cp1y),
            ctrl2: point(cp2x, cp2y),
            to: point(x, y),
        });
    }

    fn save(&mut self) {
        self.stack.push(self.style.clone());
    }

    fn restore(&mut self) {
        // Unbalanced restore is ignored, as on a canvas.
        if let Some(style) = self.stack.pop() {
            self.style = style;
        }
    }

    fn stroke_style(&self) -> &str {
        &self.style.stroke_style
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.style.stroke_style = style.to_string();
    }

    fn fill_style(&self) -> &str {
        &self.style.fill_style
    }

    fn set_fill_style(&mut self, style: &str) {
        self.style.fill_style = style.to_string();
    }

    fn line_width(&self) -> f64 {
        self.style.line_width
    }

    fn set_line_width(&mut self, width: f64) {
        // Canvas ignores non-positive and non-finite widths.
        if width.is_finite() && width > 0.0 {
            self.style.line_width = width;
        }
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ============================================================================
// TEST SUPPORT
// ============================================================================

/// A surface that logs every call, for asserting on call sequences.
#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        MoveTo(f64, f64),
        CurveTo([f64; 6]),
        Save,
        Restore,
        SetStrokeStyle(String),
        SetFillStyle(String),
        SetLineWidth(f64),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
        pub style: Style,
        stack: Vec<Style>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.ops.iter().filter(|op| pred(op)).count()
        }

        pub fn curves(&self) -> Vec<[f64; 6]> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::CurveTo(c) => Some(*c),
                    _ => None,
                })
                .collect()
        }
    }

    impl DrawingSurface for RecordingSurface {
        fn move_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::MoveTo(x, y));
        }

        fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
            self.ops.push(Op::CurveTo([cp1x, cp1y, cp2x, cp2y, x, y]));
        }

        fn save(&mut self) {
            self.ops.push(Op::Save);
            self.stack.push(self.style.clone());
        }

        fn restore(&mut self) {
            self.ops.push(Op::Restore);
            if let Some(style) = self.stack.pop() {
                self.style = style;
            }
        }

        fn stroke_style(&self) -> &str {
            &self.style.stroke_style
        }

        fn set_stroke_style(&mut self, style: &str) {
            self.ops.push(Op::SetStrokeStyle(style.to_string()));
            self.style.stroke_style = style.to_string();
        }

        fn fill_style(&self) -> &str {
            &self.style.fill_style
        }

        fn set_fill_style(&mut self, style: &str) {
            self.ops.push(Op::SetFillStyle(style.to_string()));
            self.style.fill_style = style.to_string();
        }

        fn line_width(&self) -> f64 {
            self.style.line_width
        }

        fn set_line_width(&mut self, width: f64) {
            self.ops.push(Op::SetLineWidth(width));
            self.style.line_width = width;
        }
    }
}
