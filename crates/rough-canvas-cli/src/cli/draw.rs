//! `line` and `rect` commands: draw a single primitive.

use anyhow::Result;
use clap::Args;

use super::common::{OutputArgs, view_box_for};
use super::config::DrawArgs;
use super::fill::context_for;

#[derive(Debug, Clone, Args)]
pub struct LineArgs {
    #[arg(allow_negative_numbers = true)]
    pub x1: f64,
    #[arg(allow_negative_numbers = true)]
    pub y1: f64,
    #[arg(allow_negative_numbers = true)]
    pub x2: f64,
    #[arg(allow_negative_numbers = true)]
    pub y2: f64,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub draw: DrawArgs,
}

#[derive(Debug, Clone, Args)]
pub struct RectArgs {
    #[arg(allow_negative_numbers = true)]
    pub x: f64,
    #[arg(allow_negative_numbers = true)]
    pub y: f64,
    #[arg(allow_negative_numbers = true)]
    pub width: f64,
    #[arg(allow_negative_numbers = true)]
    pub height: f64,

    /// Hachure-fill the rectangle before outlining it
    #[arg(long)]
    pub fill: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub draw: DrawArgs,
}

/// Execute the line command.
pub fn cmd_line(args: &LineArgs) -> Result<()> {
    let settings = args.draw.resolve()?;
    let mut ctx = context_for(&settings);
    ctx.stroke_sketchy_line(args.x1, args.y1, args.x2, args.y2);

    let surface = ctx.into_surface();
    args.output.write(&surface, &view_box_for(&surface))
}

/// Execute the rect command.
pub fn cmd_rect(args: &RectArgs) -> Result<()> {
    let settings = args.draw.resolve()?;
    let mut ctx = context_for(&settings);
    if args.fill {
        ctx.fill_rect(args.x, args.y, args.width, args.height);
    }
    ctx.stroke_rect(args.x, args.y, args.width, args.height);

    let surface = ctx.into_surface();
    tracing::info!("Generated {} strokes", surface.subpaths().len() / 2);
    args.output.write(&surface, &view_box_for(&surface))
}
