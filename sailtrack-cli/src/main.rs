//! SailTrack CLI - command-line interface
//!
//! Classifies maneuver subtracks and exports them as a KML overlay.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::classify::ClassifyArgs;
use commands::config::ConfigCommands;
use commands::export::ExportArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "sailtrack", version, about = "Sailing maneuver overlays for map viewers")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify subtracks and write a KML overlay
    Export(ExportArgs),

    /// Print the classification of each subtrack
    Classify(ClassifyArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn run(cli: Cli) -> Result<(), CliError> {
    let _logging = sailtrack::logging::init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Export(args) => commands::export::run(args),
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Config(command) => commands::config::run(command),
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
