//! Common helpers shared across CLI commands.

use std::path::{Path, PathBuf};

use sailtrack::config::{config_file_path, ConfigFile};
use sailtrack::geo::normalize_degrees;

use crate::error::CliError;

/// Load the config file given on the command line, or the default one.
pub fn load_config(cli_path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let path: PathBuf = cli_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);
    Ok(ConfigFile::load_from(&path)?)
}

/// Resolve the wind direction from CLI args and config.
pub fn resolve_wind(cli_wind: Option<f64>, config: &ConfigFile) -> Result<f64, CliError> {
    // CLI takes precedence, then config
    let wind = cli_wind.or(config.export.wind_direction).ok_or_else(|| {
        CliError::Config(
            "No wind direction given. Use --wind or set export.wind_direction in config.ini"
                .to_string(),
        )
    })?;

    if !wind.is_finite() {
        return Err(CliError::Config(format!("Invalid wind direction: {}", wind)));
    }

    Ok(normalize_degrees(wind))
}
