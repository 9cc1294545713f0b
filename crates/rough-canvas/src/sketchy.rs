//! Sketchy/hand-drawn line effect.
//!
//! Turns one straight segment into two randomly perturbed cubic curves:
//! a full-jitter pass and a tighter overtrace, like a pencil line that was
//! gone over twice.
//!
//! # Example
//! ```
//! use rough_canvas::rng::Rng;
//! use rough_canvas::sketchy::{RenderConfig, sketch_line};
//!
//! let config = RenderConfig::default().with_roughness(1.5);
//! let mut rng = Rng::new(7);
//! let stroke = sketch_line(0.0, 0.0, 100.0, 100.0, &config, &mut rng);
//! assert_eq!(stroke.curves.len(), 2);
//! ```

use lyon_geom::{CubicBezierSegment, point};

use crate::rng::RandomSource;
use crate::segment::DEFAULT_EPSILON;
use crate::surface::DrawingSurface;

/// Gaps below this are clamped up to it.
pub const MIN_HACHURE_GAP: f64 = 0.1;

/// Rendering parameters shared by strokes and hachure fills.
///
/// Negative `fill_weight` / `hachure_gap` mean "derive from the surface's
/// current line width" (see [`RenderConfig::resolved_fill_weight`] and
/// [`RenderConfig::resolved_gap`]).
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Multiplier on every random offset (0.0 = no jitter)
    pub roughness: f64,
    /// Scale of the midpoint displacement that bows lines
    pub bowing: f64,
    /// Absolute cap on endpoint/control point jitter, in drawing units
    pub max_randomness_offset: f64,
    /// Width of hachure lines; negative = line width / 2
    pub fill_weight: f64,
    /// Hachure direction in degrees; only the angle mod 180 matters
    pub hachure_angle: f64,
    /// Distance between hachure lines; negative = line width * 4
    pub hachure_gap: f64,
    /// Tolerance used when clipping hachure lines to shape edges
    pub intersection_epsilon: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            roughness: 1.0,
            bowing: 1.0,
            max_randomness_offset: 2.0,
            fill_weight: -1.0,
            hachure_angle: -41.0,
            hachure_gap: -1.0,
            intersection_epsilon: DEFAULT_EPSILON,
        }
    }
}

impl RenderConfig {
    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_bowing(mut self, bowing: f64) -> Self {
        self.bowing = bowing;
        self
    }

    pub fn with_max_randomness_offset(mut self, offset: f64) -> Self {
        self.max_randomness_offset = offset;
        self
    }

    pub fn with_fill_weight(mut self, fill_weight: f64) -> Self {
        self.fill_weight = fill_weight;
        self
    }

    pub fn with_hachure_angle(mut self, degrees: f64) -> Self {
        self.hachure_angle = degrees;
        self
    }

    pub fn with_hachure_gap(mut self, gap: f64) -> Self {
        self.hachure_gap = gap;
        self
    }

    pub fn with_intersection_epsilon(mut self, epsilon: f64) -> Self {
        self.intersection_epsilon = epsilon;
        self
    }

    /// Hachure spacing for a surface drawing at `line_width`.
    ///
    /// Always at least [`MIN_HACHURE_GAP`]; a NaN gap also lands there.
    pub fn resolved_gap(&self, line_width: f64) -> f64 {
        let gap = if self.hachure_gap < 0.0 {
            line_width * 4.0
        } else {
            self.hachure_gap
        };
        gap.max(MIN_HACHURE_GAP)
    }

    /// Hachure stroke width for a surface drawing at `line_width`.
    pub fn resolved_fill_weight(&self, line_width: f64) -> f64 {
        if self.fill_weight < 0.0 {
            line_width / 2.0
        } else {
            self.fill_weight
        }
    }

    /// `(sin, cos, tan)` of the hachure angle taken mod 180 degrees.
    pub fn hachure_trig(&self) -> (f64, f64, f64) {
        hachure_trig(self.hachure_angle)
    }
}

/// `(sin, cos, tan)` of `degrees` reduced into `[0, 180)`.
///
/// Hachure lines at θ and θ + 180° are the same family, so the reduction
/// keeps the trig values in a single, predictable branch.
pub fn hachure_trig(degrees: f64) -> (f64, f64, f64) {
    let radians = degrees.rem_euclid(180.0).to_radians();
    (radians.sin(), radians.cos(), radians.tan())
}

/// One sketchy rendering of a straight segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// `[full-offset pass, half-offset overtrace]`
    pub curves: [CubicBezierSegment<f64>; 2],
}

impl Stroke {
    /// Submit both curves as independent `move_to` + `bezier_curve_to` pairs.
    pub fn submit<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        for c in &self.curves {
            surface.move_to(c.from.x, c.from.y);
            surface.bezier_curve_to(c.ctrl1.x, c.ctrl1.y, c.ctrl2.x, c.ctrl2.y, c.to.x, c.to.y);
        }
    }
}

/// `roughness * uniform(min, max)`.
#[inline]
fn offset<R: RandomSource + ?Sized>(min: f64, max: f64, roughness: f64, rng: &mut R) -> f64 {
    roughness * rng.next_range(min, max)
}

/// Build the sketchy stroke for `(x1, y1) -> (x2, y2)`.
///
/// The jitter cap shrinks to a tenth of the segment "length" for short
/// segments. That length is `sqrt(2 * (x1 - x2)^2)`: it ignores the y
/// difference, so vertical segments get no endpoint jitter at all. Bowing
/// still applies to them.
///
/// Random draws happen in a fixed order (diverge point, bow x, bow y, then
/// eight draws per curve), so a seeded source reproduces a stroke exactly.
pub fn sketch_line<R: RandomSource + ?Sized>(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    config: &RenderConfig,
    rng: &mut R,
) -> Stroke {
    let roughness = config.roughness;
    let dx = x1 - x2;
    let length_sq = dx * dx + dx * dx;

    let mut jitter = config.max_randomness_offset;
    if jitter * jitter * 100.0 > length_sq {
        jitter = length_sq.sqrt() / 10.0;
    }
    let half_jitter = jitter / 2.0;

    let diverge = 0.2 + rng.next_f64() * 0.2;

    // Midpoint displacement for slightly bowed lines.
    let bow_x = config.bowing * config.max_randomness_offset * (y2 - y1) / 200.0;
    let bow_y = config.bowing * config.max_randomness_offset * (x1 - x2) / 200.0;
    let bow_x = offset(-bow_x, bow_x, roughness, rng);
    let bow_y = offset(-bow_y, bow_y, roughness, rng);

    let mut pass = |j: f64| {
        let mut off = || offset(-j, j, roughness, rng);
        let from = point(x1 + off(), y1 + off());
        let ctrl1 = point(
            bow_x + x1 + (x2 - x1) * diverge + off(),
            bow_y + y1 + (y2 - y1) * diverge + off(),
        );
        let ctrl2 = point(
            bow_x + x1 + 2.0 * (x2 - x1) * diverge + off(),
            bow_y + y1 + 2.0 * (y2 - y1) * diverge + off(),
        );
        let to = point(x2 + off(), y2 + off());
        CubicBezierSegment { from, ctrl1, ctrl2, to }
    };

    let first = pass(jitter);
    let second = pass(half_jitter);

    Stroke { curves: [first, second] }
}

/// Sketch a straight segment and submit it to `surface`.
pub fn draw_sketchy_line<S, R>(
    surface: &mut S,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    config: &RenderConfig,
    rng: &mut R,
) where
    S: DrawingSurface + ?Sized,
    R: RandomSource + ?Sized,
{
    let stroke = sketch_line(x1, y1, x2, y2, config, rng);
    tracing::trace!(x1, y1, x2, y2, "sketchy line");
    stroke.submit(surface);
}
