//! rough-canvas - sketchy rendering from the command line
//!
//! Usage:
//!   rough-canvas fill <svg|-> [-o out] [-f svg|json|png]   Hachure-fill SVG shapes
//!   rough-canvas line <x1> <y1> <x2> <y2>                  Draw one sketchy line
//!   rough-canvas rect <x> <y> <w> <h> [--fill]             Draw a sketchy rectangle
//!   rough-canvas config [--config FILE]                    Print effective settings

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use cli::{DrawArgs, FillArgs, LineArgs, RectArgs, cmd_config, cmd_fill, cmd_line, cmd_rect};

#[derive(Parser)]
#[command(name = "rough-canvas", version)]
#[command(about = "Hand-drawn strokes and hachure fills, rendered to SVG, JSON or PNG")]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Hachure-fill every shape of an SVG document
    Fill(FillArgs),
    /// Draw a single sketchy line
    Line(LineArgs),
    /// Draw a sketchy rectangle outline, optionally filled
    Rect(RectArgs),
    /// Print the effective render settings as YAML
    Config(DrawArgs),
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(log_level(cli.verbose))
        .init();

    match &cli.command {
        Command::Fill(args) => cmd_fill(args),
        Command::Line(args) => cmd_line(args),
        Command::Rect(args) => cmd_rect(args),
        Command::Config(args) => cmd_config(args),
    }
}
