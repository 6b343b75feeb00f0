//! Figure subcommands: strip and base-layout.

use crate::figure::Figure;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the strip subcommand
#[derive(Args, Debug)]
pub struct StripArgs {
    /// Figure file (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub figure: PathBuf,
}

/// Arguments for the base-layout subcommand
#[derive(Args, Debug)]
pub struct BaseLayoutArgs {
    /// Figure files (JSON or YAML); later files win on conflicting keys
    #[arg(value_name = "FILE", required = true)]
    pub figures: Vec<PathBuf>,
}

/// Read a figure from a JSON or YAML file.
pub fn read_figure(path: &Path) -> Result<Figure> {
    let value = super::template::read_value(path)?;
    Figure::from_value(value).with_context(|| format!("Invalid figure in {}", path.display()))
}
