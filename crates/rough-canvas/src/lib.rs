//! # rough-canvas
//!
//! Hand-drawn ("sketchy") rendering over an abstract 2D drawing surface.
//!
//! Straight segments become pairs of jittered cubic Béziers, and polygons
//! are filled with hachure: parallel scanlines clipped to the shape, each
//! drawn as a sketchy stroke. [`RoughContext`] wraps any [`DrawingSurface`]
//! and redirects rectangle and path calls into that style.
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod context;
pub mod fill;
pub mod geometry;
pub mod hachure;
pub mod path;
pub mod rng;
pub mod segment;
pub mod sketchy;
pub mod surface;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use context::RoughContext;
pub use fill::{hachure_chords, hachure_fill, scanline_intersections};
pub use geometry::{BoundingBox, Line, Point, Polygon};
pub use hachure::HachureIterator;
pub use rng::{RandomSource, Rng};
pub use segment::{SegmentClassifier, SegmentRelation, classify};
pub use sketchy::{RenderConfig, Stroke, draw_sketchy_line, sketch_line};
pub use surface::{DrawingSurface, StyleScope, SvgSurface};
pub use svg::{SvgError, SvgShape, extract_shapes_from_svg};
