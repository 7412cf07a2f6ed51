//! Configuration error types.

use galaxy_orbit::OrbitError;

/// Errors that can occur when loading, saving, parsing or validating
/// configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// The star's radius or position is invalid.
    #[error("invalid star '{name}': {source}")]
    InvalidStar {
        name: String,
        #[source]
        source: OrbitError,
    },

    /// A body's orbit or physical parameters are invalid.
    #[error("invalid body '{name}': {source}")]
    InvalidBody {
        name: String,
        #[source]
        source: OrbitError,
    },

    /// A body names a parent that is not declared before it.
    #[error("body '{body}' orbits unknown body '{parent}'")]
    UnknownParent { body: String, parent: String },

    /// Two bodies share a name.
    #[error("duplicate body name '{0}'")]
    DuplicateBody(String),

    /// A simulation setting is out of range.
    #[error("invalid simulation setting {field}: {value}")]
    InvalidSimulation { field: &'static str, value: f64 },
}
