//! Fill command implementation.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use rough_canvas::{RoughContext, Rng, SvgShape, SvgSurface, extract_shapes_from_svg};

use super::common::{OutputArgs, extract_viewbox, read_input, view_box_for};
use super::config::{DrawArgs, Settings};

/// Arguments of `rough-canvas fill`.
#[derive(Debug, Clone, Args)]
pub struct FillArgs {
    /// SVG file to fill, or `-` for stdin
    #[arg(value_name = "SVG")]
    pub input: String,

    /// Also sketch each shape's outline
    #[arg(long)]
    pub outline: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub draw: DrawArgs,
}

/// Build the drawing context for resolved settings.
pub fn context_for(settings: &Settings) -> RoughContext<SvgSurface> {
    let rng = settings.seed.map(Rng::new).unwrap_or_else(Rng::from_entropy);
    RoughContext::with_rng(SvgSurface::with_style(settings.style.clone()), rng).with_config(settings.render.clone())
}

/// Hachure-fill (and optionally outline) every shape onto the context.
///
/// A shape's own solid fill colour takes the place of the configured fill
/// colour for that shape only.
pub fn fill_shapes(ctx: &mut RoughContext<SvgSurface>, shapes: &[SvgShape], outline: bool) {
    let base_fill = ctx.fill_style().to_string();

    for shape in shapes {
        ctx.set_fill_style(shape.fill.as_deref().unwrap_or(&base_fill));
        ctx.fill_sketchy_polygon(&shape.polygon.points);

        if outline {
            for edge in shape.polygon.edges() {
                ctx.stroke_sketchy_line(edge.x1, edge.y1, edge.x2, edge.y2);
            }
        }
    }

    ctx.set_fill_style(&base_fill);
}

/// Execute the fill command.
pub fn cmd_fill(args: &FillArgs) -> Result<()> {
    let settings = args.draw.resolve()?;
    let svg = read_input(&args.input)?;

    let shapes = extract_shapes_from_svg(&svg).with_context(|| format!("extracting shapes from {}", args.input))?;
    tracing::info!("Loaded {} shapes", shapes.len());

    let start = Instant::now();
    let mut ctx = context_for(&settings);
    fill_shapes(&mut ctx, &shapes, args.outline);
    let surface = ctx.into_surface();

    // Every sketchy line is two subpaths.
    tracing::info!(
        "Generated {} strokes in {:.2}ms",
        surface.subpaths().len() / 2,
        start.elapsed().as_secs_f64() * 1000.0
    );

    let view_box = extract_viewbox(&svg).unwrap_or_else(|| view_box_for(&surface));
    args.output.write(&surface, &view_box)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rough_canvas::{Point, Polygon, RenderConfig};
    use rough_canvas::surface::Style;

    fn square(fill: Option<&str>) -> SvgShape {
        SvgShape {
            polygon: Polygon::new(vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ]),
            id: None,
            fill: fill.map(str::to_string),
            stroke_width: None,
        }
    }

    fn settings() -> Settings {
        Settings {
            render: RenderConfig::default().with_hachure_gap(2.0).with_hachure_angle(0.0),
            style: Style::default(),
            seed: Some(11),
        }
    }

    #[test]
    fn shape_fill_colour_is_used_then_restored() {
        let mut ctx = context_for(&settings());
        ctx.set_fill_style("#00ff00");
        fill_shapes(&mut ctx, &[square(Some("#ff0000")), square(None)], false);

        assert_eq!(ctx.fill_style(), "#00ff00");
        let colors: Vec<&str> = ctx.surface().subpaths().iter().map(|s| s.stroke_style.as_str()).collect();
        assert_eq!(colors.len(), 20);
        assert!(colors[..10].iter().all(|c| *c == "#ff0000"));
        assert!(colors[10..].iter().all(|c| *c == "#00ff00"));
    }

    #[test]
    fn outline_adds_one_stroke_per_edge() {
        let mut ctx = context_for(&settings());
        fill_shapes(&mut ctx, &[square(None)], true);
        // 5 hachure chords + 4 edges, two subpaths each.
        assert_eq!(ctx.surface().subpaths().len(), 18);
    }

    #[test]
    fn same_seed_same_output() {
        let run = || {
            let mut ctx = context_for(&settings());
            fill_shapes(&mut ctx, &[square(None)], true);
            ctx.into_surface().to_svg("0 0 10 10")
        };
        assert_eq!(run(), run());
    }
}
