//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use galaxy_orbit::{
    CelestialBody, DEFAULT_TRANSITION_DELAY, OrbitDefinition, OrbitPathStyle, OrbitalParameters,
    SolarSystem, Star,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "galaxy";

/// Default location of `config.ron`: `<os config dir>/galaxy`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulation scales and run length.
    pub simulation: SimulationConfig,
    /// Default orbit line style for bodies that draw their orbit.
    pub orbit_path: OrbitPathStyle,
    /// Debug/development settings.
    pub debug: DebugConfig,
    /// The star system to simulate.
    pub system: SystemConfig,
}

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated seconds per real second. Negative runs orbits backwards.
    pub time_scale: f64,
    /// System-wide orbit distance multiplier.
    pub distance_scale: f64,
    /// System-wide body size multiplier.
    pub system_scale: f64,
    /// Length of a headless run in seconds.
    pub duration_seconds: f64,
    /// Seconds between progress reports.
    pub report_interval_seconds: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            distance_scale: 1.0,
            system_scale: 1.0,
            duration_seconds: 60.0,
            report_interval_seconds: 10.0,
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// The star and the bodies orbiting it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    pub star: Star,
    /// Bodies in dependency order: a body's parent must appear before it.
    pub bodies: Vec<BodyConfig>,
}

/// A single planet or moon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    pub name: String,
    /// Name of the body this one orbits; `None` orbits the star.
    pub parent: Option<String>,
    /// Physical radius in scene units.
    pub radius: f64,
    /// Axial tilt in degrees.
    pub axial_tilt: f64,
    /// Starting orbit angle in degrees.
    pub start_angle: f64,
    pub orbit: OrbitDefinition,
    /// Produce orbit path samples for this body.
    pub draw_orbit: bool,
    /// Follow the orbit; when false the body stays where it is.
    pub move_body: bool,
    /// Seconds to glide onto an edited orbit.
    pub transition_delay: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            name: "Earth".to_string(),
            parent: None,
            radius: 0.6371,
            axial_tilt: 23.44,
            start_angle: 0.0,
            orbit: OrbitDefinition::default(),
            draw_orbit: false,
            move_body: true,
            transition_delay: DEFAULT_TRANSITION_DELAY,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        let earth = BodyConfig {
            draw_orbit: true,
            ..BodyConfig::default()
        };
        let moon = BodyConfig {
            name: "Moon".to_string(),
            parent: Some("Earth".to_string()),
            radius: 0.1737,
            axial_tilt: 6.68,
            orbit: OrbitDefinition {
                semi_major_axis: 3.844,
                eccentricity: 0.0549,
                orbit_period: 1.0,
                min_speed: 0.97,
                max_speed: 1.08,
                ..OrbitDefinition::default()
            },
            ..BodyConfig::default()
        };
        let mars = BodyConfig {
            name: "Mars".to_string(),
            radius: 0.3390,
            axial_tilt: 25.19,
            start_angle: 120.0,
            orbit: OrbitDefinition {
                semi_major_axis: 227.9,
                eccentricity: 0.0934,
                orbit_period: 668.6,
                min_speed: 21.97,
                max_speed: 26.5,
                ..OrbitDefinition::default()
            },
            draw_orbit: true,
            ..BodyConfig::default()
        };
        Self {
            star: Star::default(),
            bodies: vec![earth, moon, mars],
        }
    }
}

// --- Validation / construction ---

fn check(field: &'static str, value: f64, ok: bool) -> Result<(), ConfigError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidSimulation { field, value })
    }
}

impl SimulationConfig {
    /// Reject scales that would make every step fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("time_scale", self.time_scale, true)?;
        check("distance_scale", self.distance_scale, self.distance_scale > 0.0)?;
        check("system_scale", self.system_scale, self.system_scale > 0.0)?;
        check(
            "duration_seconds",
            self.duration_seconds,
            self.duration_seconds >= 0.0,
        )?;
        check(
            "report_interval_seconds",
            self.report_interval_seconds,
            self.report_interval_seconds > 0.0,
        )?;
        Ok(())
    }
}

impl Config {
    /// Check every setting without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_system().map(|_| ())
    }

    /// Build the star system described by `system`, applying the simulation
    /// scale and the default orbit path style.
    pub fn build_system(&self) -> Result<SolarSystem, ConfigError> {
        self.simulation.validate()?;

        let mut system =
            SolarSystem::new(self.system.star.clone()).map_err(|source| {
                ConfigError::InvalidStar {
                    name: self.system.star.name.clone(),
                    source,
                }
            })?;
        system
            .set_scale(self.simulation.system_scale)
            .map_err(|_| ConfigError::InvalidSimulation {
                field: "system_scale",
                value: self.simulation.system_scale,
            })?;

        let mut ids = HashMap::new();
        for body in &self.system.bodies {
            if ids.contains_key(body.name.as_str()) {
                return Err(ConfigError::DuplicateBody(body.name.clone()));
            }

            let parent = match &body.parent {
                Some(parent) => Some(*ids.get(parent.as_str()).ok_or_else(|| {
                    ConfigError::UnknownParent {
                        body: body.name.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };

            let invalid = |source| ConfigError::InvalidBody {
                name: body.name.clone(),
                source,
            };
            let params = OrbitalParameters::try_from(body.orbit.clone()).map_err(invalid)?;

            let mut celestial = CelestialBody::new(body.name.clone(), params, body.radius)
                .and_then(|b| b.with_axial_tilt(body.axial_tilt))
                .and_then(|b| b.with_start_angle(body.start_angle))
                .and_then(|b| b.with_transition_delay(body.transition_delay))
                .map_err(invalid)?
                .with_orbit_path(body.draw_orbit, self.orbit_path.clone());
            celestial.set_move_body(body.move_body);

            let id = system.add_body(celestial, parent).map_err(invalid)?;
            ids.insert(body.name.as_str(), id);
        }

        log::debug!("Built system with {} bodies", system.len());
        Ok(system)
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
