//! `export` command: classify subtracks and write the KML overlay.

use std::path::PathBuf;

use clap::Args;
use sailtrack::kml::export_maneuvers;
use sailtrack::track::load_subtracks;

use super::common::{load_config, resolve_wind};
use crate::error::CliError;

/// Arguments for the export command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON file with the maneuver subtracks
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination KML file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Wind direction in degrees (direction the wind blows from)
    #[arg(short, long, allow_negative_numbers = true)]
    pub wind: Option<f64>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the export command.
pub fn run(args: ExportArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let wind = resolve_wind(args.wind, &config)?;
    let subtracks = load_subtracks(&args.input)?;

    let summary = export_maneuvers(&subtracks, wind, &args.output, &config.palette)?;

    println!(
        "Wrote {} maneuvers to {}",
        summary.subtracks,
        args.output.display()
    );
    println!(
        "  port jibes: {}  port tacks: {}  starboard jibes: {}  starboard tacks: {}  unknown: {}",
        summary.port_jibes,
        summary.port_tacks,
        summary.starboard_jibes,
        summary.starboard_tacks,
        summary.unknown
    );

    Ok(())
}
