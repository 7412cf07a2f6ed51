//! The binary entry point: a headless orbital simulation run.

use std::process::ExitCode;

use clap::Parser;
use galaxy_app::platform::PlatformDirs;
use galaxy_app::runner::{run_headless, write_snapshot};
use galaxy_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(root) => Ok(PlatformDirs::resolve_with_root(root)),
        None => PlatformDirs::resolve(),
    };
    let dirs = match dirs.and_then(|dirs| dirs.create_dirs().map(|()| dirs)) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to initialize platform directories: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);

    galaxy_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(config = %dirs.config_dir.display(), "galaxy starting");

    let mut system = match config.build_system() {
        Ok(system) => system,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = match run_headless(&mut system, &config.simulation) {
        Ok(report) => report,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &args.snapshot
        && let Err(e) = write_snapshot(&report.snapshot, path)
    {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
