//! Configuration system for the galaxy simulation.
//!
//! Settings persist to disk as RON files and describe both the simulation
//! (time and distance scales, run length) and the star system itself. Supports
//! CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BodyConfig, Config, DebugConfig, SimulationConfig, SystemConfig, default_config_dir,
};
pub use error::ConfigError;
