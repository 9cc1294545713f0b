//! Sketch context: a 2D-canvas-shaped façade over a [`DrawingSurface`].
//!
//! Rectangle and path calls are redirected into sketchy strokes and
//! hachure fills; everything else stays on the surface itself, reachable
//! through [`RoughContext::surface_mut`].
//!
//! # Example
//! ```
//! use rough_canvas::{RoughContext, SvgSurface};
//! use rough_canvas::rng::Rng;
//!
//! let mut ctx = RoughContext::with_rng(SvgSurface::new(), Rng::new(1));
//! ctx.set_fill_style("#aa3300");
//! ctx.fill_rect(10.0, 10.0, 80.0, 40.0);
//! ctx.stroke_rect(10.0, 10.0, 80.0, 40.0);
//!
//! let svg = ctx.into_surface().to_svg("0 0 100 60");
//! assert!(svg.contains("<path"));
//! ```

use crate::fill::hachure_fill;
use crate::geometry::Point;
use crate::path::{CURVE_TOLERANCE, PathCommand, PathRecorder};
use crate::rng::{RandomSource, Rng};
use crate::sketchy::{RenderConfig, draw_sketchy_line};
use crate::surface::DrawingSurface;

/// Sketchy drawing context.
///
/// Owns its surface, its [`RenderConfig`] and its random source. The config
/// can be changed freely between calls; each call reads it once.
pub struct RoughContext<S: DrawingSurface, R: RandomSource = Rng> {
    surface: S,
    config: RenderConfig,
    rng: R,
    path: PathRecorder,
    path_closed: bool,
}

impl<S: DrawingSurface> RoughContext<S, Rng> {
    /// Context drawing with a clock-seeded generator.
    pub fn new(surface: S) -> Self {
        Self::with_rng(surface, Rng::from_entropy())
    }
}

impl<S: DrawingSurface, R: RandomSource> RoughContext<S, R> {
    /// Context drawing with the given random source (seed it for
    /// reproducible output).
    pub fn with_rng(surface: S, rng: R) -> Self {
        Self {
            surface,
            config: RenderConfig::default(),
            rng,
            path: PathRecorder::new(),
            path_closed: true,
        }
    }

    /// Replace the config at construction time.
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access for everything the context does not redirect
    /// (text, gradients, transforms, ...).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    // ------------------------------------------------------------------
    // Forwarded style registers
    // ------------------------------------------------------------------

    pub fn line_width(&self) -> f64 {
        self.surface.line_width()
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.surface.set_line_width(width);
    }

    pub fn stroke_style(&self) -> &str {
        self.surface.stroke_style()
    }

    pub fn set_stroke_style(&mut self, style: &str) {
        self.surface.set_stroke_style(style);
    }

    pub fn fill_style(&self) -> &str {
        self.surface.fill_style()
    }

    pub fn set_fill_style(&mut self, style: &str) {
        self.surface.set_fill_style(style);
    }

    // ------------------------------------------------------------------
    // Core operations
    // ------------------------------------------------------------------

    /// Draw one sketchy line.
    pub fn stroke_sketchy_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        draw_sketchy_line(&mut self.surface, x1, y1, x2, y2, &self.config, &mut self.rng);
    }

    /// Hachure-fill a polygon. Empty input is a no-op.
    pub fn fill_sketchy_polygon(&mut self, points: &[Point]) {
        hachure_fill(&mut self.surface, points, &self.config, &mut self.rng);
    }

    // ------------------------------------------------------------------
    // Rectangles
    // ------------------------------------------------------------------

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.fill_sketchy_polygon(&rect_corners(x, y, width, height));
    }

    /// Four sketchy edges: top, right, bottom, left.
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let [tl, tr, br, bl] = rect_corners(x, y, width, height);
        for (a, b) in [(tl, tr), (tr, br), (br, bl), (bl, tl)] {
            self.stroke_sketchy_line(a.x, a.y, b.x, b.y);
        }
    }

    // ------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------

    pub fn begin_path(&mut self) {
        self.path.clear();
        self.path_closed = false;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(PathCommand::MoveTo(Point::new(x, y)));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(PathCommand::LineTo(Point::new(x, y)));
    }

    pub fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.path.push(PathCommand::BezierTo {
            ctrl1: Point::new(cp1x, cp1y),
            ctrl2: Point::new(cp2x, cp2y),
            to: Point::new(x, y),
        });
    }

    pub fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.path.push(PathCommand::QuadTo {
            ctrl: Point::new(cpx, cpy),
            to: Point::new(x, y),
        });
    }

    /// Close an open path back to its first point.
    ///
    /// A closing `line_to` is added only when the first and last cursors
    /// differ after rounding to whole units.
    pub fn close_path(&mut self) {
        if !self.path_closed && self.path.len() > 1 {
            if let (Some(first), Some(last)) = (self.path.first_cursor(), self.path.last_cursor()) {
                if first.x.round() != last.x.round() || first.y.round() != last.y.round() {
                    self.line_to(first.x, first.y);
                }
            }
        }
        self.path_closed = true;
    }

    pub fn is_path_closed(&self) -> bool {
        self.path_closed
    }

    /// The recorded path commands.
    pub fn path(&self) -> &PathRecorder {
        &self.path
    }

    /// Hachure-fill every subpath of the current path.
    pub fn fill(&mut self) {
        for points in self.path.subpaths(CURVE_TOLERANCE) {
            self.fill_sketchy_polygon(&points);
        }
    }

    /// Sketch-stroke the current path vertex to vertex.
    pub fn stroke(&mut self) {
        for points in self.path.subpaths(CURVE_TOLERANCE) {
            for pair in points.windows(2) {
                self.stroke_sketchy_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y);
            }
        }
    }

    // ------------------------------------------------------------------
    // Unsupported
    // ------------------------------------------------------------------

    /// Not supported: logs a warning and draws nothing.
    pub fn draw_focus_if_needed(&mut self) {
        tracing::warn!("RoughContext does not support draw_focus_if_needed");
    }
}

fn rect_corners(x: f64, y: f64, width: f64, height: f64) -> [Point; 4] {
    let (left, right) = (x, x + width);
    let (top, bottom) = (y, y + height);
    [
        Point::new(left, top),
        Point::new(right, top),
        Point::new(right, bottom),
        Point::new(left, bottom),
    ]
}
