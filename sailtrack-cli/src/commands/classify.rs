//! `classify` command: print the category of each subtrack.

use std::path::PathBuf;

use clap::Args;
use sailtrack::maneuver::classify;
use sailtrack::track::load_subtracks;

use super::common::{load_config, resolve_wind};
use crate::error::CliError;

/// Arguments for the classify command.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// JSON file with the maneuver subtracks
    #[arg(short, long)]
    pub input: PathBuf,

    /// Wind direction in degrees (direction the wind blows from)
    #[arg(short, long, allow_negative_numbers = true)]
    pub wind: Option<f64>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the classify command.
pub fn run(args: ClassifyArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let wind = resolve_wind(args.wind, &config)?;
    let subtracks = load_subtracks(&args.input)?;

    println!("Wind: {:.1}°", wind);
    for (index, subtrack) in subtracks.iter().enumerate() {
        let maneuver = classify(subtrack, index, wind);
        println!(
            "{:<45} {:<14} {} points",
            maneuver.label.display_name,
            maneuver.category().style_id(),
            subtrack.points.len()
        );
    }

    Ok(())
}
