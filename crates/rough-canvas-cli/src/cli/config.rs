//! Render settings: config file + command-line overrides.
//!
//! Precedence is defaults < `--config` file < flags. The file may be YAML or
//! JSON (picked by a `.json` extension); every field is optional.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use rough_canvas::RenderConfig;
use rough_canvas::surface::Style;

/// Settings as read from a config file, or as printed by `rough-canvas config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_randomness_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hachure_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hachure_gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl FileConfig {
    /// Read a YAML or JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            serde_json::from_str(&text).with_context(|| format!("parsing JSON config {}", path.display()))?
        } else {
            serde_yaml::from_str(&text).with_context(|| format!("parsing YAML config {}", path.display()))?
        };
        Ok(config)
    }

    /// Overlay every field set in `other` onto `self`.
    pub fn merge(mut self, other: FileConfig) -> Self {
        fn pick<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        pick(&mut self.roughness, other.roughness);
        pick(&mut self.bowing, other.bowing);
        pick(&mut self.max_randomness_offset, other.max_randomness_offset);
        pick(&mut self.fill_weight, other.fill_weight);
        pick(&mut self.hachure_angle, other.hachure_angle);
        pick(&mut self.hachure_gap, other.hachure_gap);
        pick(&mut self.line_width, other.line_width);
        pick(&mut self.stroke_color, other.stroke_color);
        pick(&mut self.fill_color, other.fill_color);
        pick(&mut self.seed, other.seed);
        self
    }
}

/// Flags shared by every drawing command.
#[derive(Debug, Clone, Default, Args)]
pub struct DrawArgs {
    /// YAML or JSON file with render settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<std::path::PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hachure line spacing (negative = 4 x line width)
    #[arg(long, allow_negative_numbers = true)]
    pub gap: Option<f64>,

    /// Hachure angle in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub angle: Option<f64>,

    #[arg(long)]
    pub roughness: Option<f64>,

    #[arg(long)]
    pub bowing: Option<f64>,

    /// Maximum endpoint jitter
    #[arg(long = "max-offset")]
    pub max_offset: Option<f64>,

    /// Hachure stroke width (negative = half the line width)
    #[arg(long = "fill-weight", allow_negative_numbers = true)]
    pub fill_weight: Option<f64>,

    #[arg(long = "line-width")]
    pub line_width: Option<f64>,

    /// Stroke colour
    #[arg(long)]
    pub color: Option<String>,

    /// Hachure colour
    #[arg(long = "fill-color")]
    pub fill_color: Option<String>,
}

impl DrawArgs {
    fn as_overrides(&self) -> FileConfig {
        FileConfig {
            roughness: self.roughness,
            bowing: self.bowing,
            max_randomness_offset: self.max_offset,
            fill_weight: self.fill_weight,
            hachure_angle: self.angle,
            hachure_gap: self.gap,
            line_width: self.line_width,
            stroke_color: self.color.clone(),
            fill_color: self.fill_color.clone(),
            seed: self.seed,
        }
    }

    /// Resolve the effective settings: file first, then flags on top.
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Settings::from_file_config(&file.merge(self.as_overrides())))
    }
}

/// Fully resolved settings handed to the drawing commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub render: RenderConfig,
    pub style: Style,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_file_config(file: &FileConfig) -> Self {
        let defaults = RenderConfig::default();
        let render = RenderConfig {
            roughness: file.roughness.unwrap_or(defaults.roughness),
            bowing: file.bowing.unwrap_or(defaults.bowing),
            max_randomness_offset: file.max_randomness_offset.unwrap_or(defaults.max_randomness_offset),
            fill_weight: file.fill_weight.unwrap_or(defaults.fill_weight),
            hachure_angle: file.hachure_angle.unwrap_or(defaults.hachure_angle),
            hachure_gap: file.hachure_gap.unwrap_or(defaults.hachure_gap),
            ..defaults
        };

        let mut style = Style::default();
        if let Some(width) = file.line_width.filter(|w| w.is_finite() && *w > 0.0) {
            style.line_width = width;
        }
        if let Some(color) = &file.stroke_color {
            style.stroke_style = color.clone();
        }
        if let Some(color) = &file.fill_color {
            style.fill_style = color.clone();
        }

        Self { render, style, seed: file.seed }
    }

    /// Every field filled in, for printing.
    pub fn to_file_config(&self) -> FileConfig {
        FileConfig {
            roughness: Some(self.render.roughness),
            bowing: Some(self.render.bowing),
            max_randomness_offset: Some(self.render.max_randomness_offset),
            fill_weight: Some(self.render.fill_weight),
            hachure_angle: Some(self.render.hachure_angle),
            hachure_gap: Some(self.render.hachure_gap),
            line_width: Some(self.style.line_width),
            stroke_color: Some(self.style.stroke_style.clone()),
            fill_color: Some(self.style.fill_style.clone()),
            seed: self.seed,
        }
    }
}

/// Execute the config command: print the effective settings as YAML.
pub fn cmd_config(args: &DrawArgs) -> Result<()> {
    let settings = args.resolve()?;
    let yaml = serde_yaml::to_string(&settings.to_file_config()).context("serializing config")?;
    print!("{yaml}");
    Ok(())
}
