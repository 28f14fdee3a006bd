//! Configuration CLI commands.

use std::path::PathBuf;

use clap::Subcommand;
use sailtrack::config::{config_file_path, ConfigFile};

use super::common::load_config;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective settings
    Show {
        /// Config file (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            println!("{}", config_file_path().display());
            Ok(())
        }
        ConfigCommands::Show { config } => {
            let config = load_config(config.as_deref())?;
            for line in describe(&config) {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

/// One `key = value` line per effective setting.
fn describe(config: &ConfigFile) -> Vec<String> {
    let mut lines = Vec::new();

    match config.export.wind_direction {
        Some(wind) => lines.push(format!("export.wind_direction = {}", wind)),
        None => lines.push("export.wind_direction = (not set)".to_string()),
    }
    for (id, style) in config.palette.line_styles() {
        lines.push(format!(
            "styles.{} = {} (width {})",
            id, style.color, style.width
        ));
    }
    lines.push(format!("styles.arrow_icon = {}", config.palette.arrow.href));
    lines.push(format!("styles.arrow_scale = {}", config.palette.arrow.scale));

    lines
}
