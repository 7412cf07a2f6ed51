//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Galaxy simulation command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "galaxy", about = "Headless orbital simulation")]
pub struct CliArgs {
    /// Simulated seconds per real second.
    #[arg(long, allow_negative_numbers = true)]
    pub time_scale: Option<f64>,

    /// System-wide orbit distance multiplier.
    #[arg(long)]
    pub distance_scale: Option<f64>,

    /// Run length in seconds.
    #[arg(long)]
    pub duration: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the final system snapshot as RON to this file.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(scale) = args.time_scale {
            self.simulation.time_scale = scale;
        }
        if let Some(scale) = args.distance_scale {
            self.simulation.distance_scale = scale;
        }
        if let Some(duration) = args.duration {
            self.simulation.duration_seconds = duration;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
