//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Args, ValueEnum};
use resvg::usvg;
use serde::Serialize;
use tiny_skia::Pixmap;

use rough_canvas::{BoundingBox, SvgSurface};

/// Output format for rendered strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Svg,
    Json,
    Png,
}

/// Where and how to write the result.
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Output file (stdout if omitted or `-`)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,
}

impl OutputArgs {
    pub fn write(&self, surface: &SvgSurface, view_box: &str) -> Result<()> {
        write_surface(surface, view_box, self.format, self.output.as_deref())
    }
}

/// Longest side of a rasterized image, in pixels.
const PNG_MAX_SIDE: f32 = 1024.0;

/// Margin added around computed view boxes.
const VIEW_MARGIN: f64 = 5.0;

/// One recorded subpath in JSON output. Curves are
/// `[cp1x, cp1y, cp2x, cp2y, x, y]`, chained from `start`.
#[derive(Serialize)]
struct JsonStroke<'a> {
    color: &'a str,
    width: f64,
    start: [f64; 2],
    curves: Vec<[f64; 6]>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    view_box: &'a str,
    strokes: Vec<JsonStroke<'a>>,
}

/// Read an SVG document from a path, or stdin for `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("reading SVG from stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {path}"))
    }
}

/// Extract viewBox from SVG content.
pub fn extract_viewbox(svg: &str) -> Option<String> {
    ["viewBox=\"", "viewbox=\""].iter().find_map(|attr| {
        let start = svg.find(attr)? + attr.len();
        let rest = &svg[start..];
        rest.find('"').map(|end| rest[..end].to_string())
    })
}

/// View box covering everything drawn on `surface`, with a small margin.
pub fn view_box_for(surface: &SvgSurface) -> String {
    match surface.bounds() {
        Some(b) => format_view_box(&b.expand(VIEW_MARGIN)),
        None => "0 0 100 100".to_string(),
    }
}

fn format_view_box(b: &BoundingBox) -> String {
    format!("{:.2} {:.2} {:.2} {:.2}", b.left, b.top, b.width(), b.height())
}

/// Serialize the recorded strokes as JSON.
pub fn surface_to_json(surface: &SvgSurface, view_box: &str) -> Result<String> {
    let strokes = surface
        .subpaths()
        .iter()
        .filter(|s| !s.curves.is_empty())
        .map(|s| JsonStroke {
            color: &s.stroke_style,
            width: s.line_width,
            start: [s.start.x, s.start.y],
            curves: s
                .curves
                .iter()
                .map(|c| [c.ctrl1.x, c.ctrl1.y, c.ctrl2.x, c.ctrl2.y, c.to.x, c.to.y])
                .collect(),
        })
        .collect();

    serde_json::to_string_pretty(&JsonOutput { view_box, strokes }).context("serializing strokes")
}

/// Rasterize an SVG document to PNG bytes on a white background.
pub fn render_png(svg: &str) -> Result<Vec<u8>> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).context("parsing rendered SVG")?;

    let size = tree.size();
    let scale = PNG_MAX_SIDE / size.width().max(size.height());
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap =
        Pixmap::new(width, height).ok_or_else(|| anyhow!("cannot allocate a {width}x{height} image"))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap.encode_png().context("encoding PNG")
}

/// Render `surface` in `format` and write it to `output` (stdout for `-` or none).
pub fn write_surface(surface: &SvgSurface, view_box: &str, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let bytes = match format {
        OutputFormat::Svg => surface.to_svg(view_box).into_bytes(),
        OutputFormat::Json => {
            let mut json = surface_to_json(surface, view_box)?;
            json.push('\n');
            json.into_bytes()
        }
        OutputFormat::Png => render_png(&surface.to_svg(view_box))?,
    };

    match output {
        Some(path) if path != Path::new("-") => {
            fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Output written to {}", path.display());
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes).context("writing to stdout")?;
            stdout.flush().context("writing to stdout")?;
        }
    }
    Ok(())
}
