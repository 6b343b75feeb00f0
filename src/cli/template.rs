//! Template subcommand for quant-theme CLI
//!
//! Builds a template from a theme plus layout options. Options can come from
//! a keyword file (`--options`) and from flags; flags win.

use crate::error::ThemeError;
use crate::options::{Hovermode, Legend, TemplateOptions, ThemeSpec, coerce_margin, figsize_to_dimensions};
use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Arguments for the template subcommand
#[derive(Args, Debug, Default)]
pub struct TemplateArgs {
    /// Theme name, or a path to a theme file (JSON or YAML)
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Keyword options file (JSON or YAML), e.g. `{title: AAPL, figsize: [10, 6]}`
    #[arg(short, long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Custom layout file (JSON or YAML), merged last
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Chart title
    #[arg(long)]
    pub title: Option<String>,

    /// Chart width in pixels (disables autosize)
    #[arg(long)]
    pub width: Option<u32>,

    /// Chart height in pixels (disables autosize)
    #[arg(long)]
    pub height: Option<u32>,

    /// Chart size in pixels: WIDTH,HEIGHT
    #[arg(long, value_name = "W,H", value_delimiter = ',')]
    pub dimensions: Option<Vec<u32>>,

    /// Matplotlib-style size in inches (x80 pixels): WIDTH,HEIGHT
    #[arg(long, value_name = "W,H", value_delimiter = ',')]
    pub figsize: Option<Vec<f64>>,

    /// Margins: L,R,B,T or L,R,B,T,PAD
    #[arg(long, value_name = "L,R,B,T[,PAD]", value_delimiter = ',')]
    pub margin: Option<Vec<u32>>,

    /// Show or hide the legend
    #[arg(long, value_name = "BOOL")]
    pub legend: Option<bool>,

    /// Hover mode (x, y, closest) or `false` to disable
    #[arg(long, value_name = "MODE")]
    pub hovermode: Option<String>,
}

impl TemplateArgs {
    /// Combine the options file and flags into template options.
    pub fn to_options(&self) -> Result<TemplateOptions> {
        let mut options = match &self.options {
            Some(path) => TemplateOptions::from_value(&read_value(path)?)
                .with_context(|| format!("Invalid options in {}", path.display()))?,
            None => TemplateOptions::default(),
        };

        if let Some(theme) = &self.theme {
            options.theme = Some(theme_spec(theme)?);
        }

        if let Some(path) = &self.layout {
            options = options
                .with_layout(&read_value(path)?)
                .with_context(|| format!("Invalid layout in {}", path.display()))?;
        }

        if let Some(title) = &self.title {
            options.title = Some(title.clone());
        }

        if let Some(width) = self.width {
            options.width = Some(width);
        }

        if let Some(height) = self.height {
            options.height = Some(height);
        }

        if let Some(dimensions) = &self.dimensions {
            match dimensions.as_slice() {
                [width, height] => options.dimensions = Some((*width, *height)),
                _ => bail!("--dimensions takes exactly two values: WIDTH,HEIGHT"),
            }
        }

        if let Some(figsize) = &self.figsize {
            match figsize.as_slice() {
                [width, height] => options.figsize = Some(figsize_to_dimensions(*width, *height)?),
                _ => bail!("--figsize takes exactly two values: WIDTH,HEIGHT"),
            }
        }

        if let Some(margin) = &self.margin {
            options.margin = Some(coerce_margin(&Value::from(margin.clone()))?);
        }

        if let Some(visible) = self.legend {
            options.legend = Some(Legend::Visible(visible));
        }

        if let Some(mode) = &self.hovermode {
            options.hovermode = Some(match mode.as_str() {
                "false" | "off" => Hovermode::Off,
                "true" => return Err(ThemeError::invalid_argument("hovermode", mode).into()),
                mode => Hovermode::Mode(mode.to_string()),
            });
        }

        Ok(options)
    }
}

/// A theme argument names a file when it has a JSON/YAML extension.
fn theme_spec(theme: &str) -> Result<ThemeSpec> {
    let path = Path::new(theme);
    let is_file = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json" | "yaml" | "yml")
    );
    if is_file {
        Ok(ThemeSpec::Inline(read_value(path)?))
    } else {
        Ok(ThemeSpec::Named(theme.to_string()))
    }
}

/// Read a JSON or YAML file into a value.
pub fn read_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    // YAML is a superset of JSON, so one parser covers both
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
