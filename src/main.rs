//! Quant Theme CLI
//!
//! Prints themes, the skeleton, and merged chart templates.

use anyhow::Result;
use clap::Parser;
use quant_theme::cli::figure::read_figure;
use quant_theme::cli::{Cli, Command};
use quant_theme::config::{ConfigLoader, ConfigPaths};
use quant_theme::figure::{get_base_layout, strip_figure};
use quant_theme::logging::{self, LogTarget};
use quant_theme::template::get_template;
use quant_theme::theming::{get_skeleton, get_theme, get_themes};
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut paths = ConfigPaths::discover();
    if let Some(config_path) = &cli.config {
        paths = paths.with_explicit_file(config_path);
    }
    let loader = ConfigLoader::load_with_paths(paths)?;
    for source in loader.sources() {
        debug!(path = %source.display(), "Using config file");
    }
    let config = loader.into_config();
    let format = cli.format.unwrap_or(config.output);

    let output = match cli.command {
        Command::Themes => format.render(&get_themes())?,
        Command::Theme { name } => format.render(&get_theme(&name)?)?,
        Command::Skeleton => format.render(&get_skeleton()?)?,
        Command::Template(args) => {
            let options = args.to_options()?;
            let template = get_template(&options, &config.theme)?;
            info!(traces = template.traces.len(), "Template built");
            format.render(&template)?
        }
        Command::Strip(args) => {
            let figure = read_figure(&args.figure)?;
            format.render(&strip_figure(&figure))?
        }
        Command::BaseLayout(args) => {
            let figures = args
                .figures
                .iter()
                .map(|path| read_figure(path))
                .collect::<Result<Vec<_>>>()?;
            format.render(&get_base_layout(&figures))?
        }
    };

    println!("{}", output);
    Ok(())
}
