//! CLI command definitions for quant-theme
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod figure;
pub mod template;

use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use figure::{BaseLayoutArgs, StripArgs};
use std::path::PathBuf;
use template::TemplateArgs;

/// Chart theme and template generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (replaces project and user config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Output format (overrides config)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available themes
    Themes,

    /// Print a theme
    Theme {
        /// Theme name
        name: String,
    },

    /// Print the base skeleton
    Skeleton,

    /// Build a template from a theme and layout options
    Template(TemplateArgs),

    /// Split a figure into one figure per trace
    Strip(StripArgs),

    /// Print the union of several figures' layouts
    BaseLayout(BaseLayoutArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["quant-theme", "themes", "--format", "yaml", "-v"]).unwrap();
        assert!(matches!(cli.command, Command::Themes));
        assert_eq!(cli.format, Some(OutputFormat::Yaml));
        assert!(cli.verbose);
        assert_eq!(cli.log, "2");
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["quant-theme"]).is_err());
    }
}
