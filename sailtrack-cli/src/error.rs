//! CLI error type.

use sailtrack::config::ConfigError;
use sailtrack::logging::LoggingError;
use sailtrack::track::TrackLoadError;
use sailtrack::ExportError;
use thiserror::Error;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration file could not be loaded.
    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    /// The subtrack input could not be loaded.
    #[error(transparent)]
    Input(#[from] TrackLoadError),

    /// The overlay could not be written.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Logging could not be initialized.
    #[error(transparent)]
    Logging(#[from] LoggingError),
}
