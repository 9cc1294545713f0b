//! CLI command implementations.
//!
//! - `fill` - Hachure-fill the shapes of an SVG file
//! - `line` / `rect` - Draw a single sketchy primitive
//! - `config` - Print the effective render settings

pub mod common;
pub mod config;
pub mod draw;
pub mod fill;

pub use config::{DrawArgs, cmd_config};
pub use draw::{LineArgs, RectArgs, cmd_line, cmd_rect};
pub use fill::{FillArgs, cmd_fill};
