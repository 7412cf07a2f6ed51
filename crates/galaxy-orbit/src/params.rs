//! Orbital parameters with validation and derived ellipse values.

use serde::{Deserialize, Serialize};

use crate::error::OrbitError;
use crate::mechanics;

/// Sense of travel around the orbit, or of spin around the body's axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Default for both orbit and spin.
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Per-body multipliers applied on top of the system-wide scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitScales {
    /// Multiplies the linear orbital speed.
    pub velocity: f64,
    /// Multiplies the number of axial spins per orbit.
    pub rotation: f64,
    /// Multiplies the body radius.
    pub radius: f64,
    /// Multiplies the orbit size.
    pub orbit_distance: f64,
}

impl Default for OrbitScales {
    fn default() -> Self {
        Self {
            velocity: 1.0,
            rotation: 1.0,
            radius: 1.0,
            orbit_distance: 1.0,
        }
    }
}

/// Unvalidated orbit description as it appears in configuration files.
///
/// Convert with [`OrbitalParameters::try_from`] before simulating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitDefinition {
    /// Semi-major axis in distance units (e.g. millions of km).
    pub semi_major_axis: f64,
    /// Eccentricity in `[0, 1)`.
    pub eccentricity: f64,
    /// Axial spins per orbit.
    pub orbit_period: f64,
    /// Linear speed at angle 0.
    pub min_speed: f64,
    /// Linear speed at angle 180.
    pub max_speed: f64,
    pub orbit_direction: Direction,
    pub spin_direction: Direction,
    pub scales: OrbitScales,
}

impl Default for OrbitDefinition {
    fn default() -> Self {
        // Earth-like: 149.6 million km, ~29.8 km/s mean.
        Self {
            semi_major_axis: 149.6,
            eccentricity: 0.0167,
            orbit_period: 365.26,
            min_speed: 29.29,
            max_speed: 30.29,
            orbit_direction: Direction::Clockwise,
            spin_direction: Direction::Clockwise,
            scales: OrbitScales::default(),
        }
    }
}

/// Validated orbital parameters.
///
/// Semi-minor axis and perimeter are derived from the semi-major axis and
/// eccentricity and are kept in sync by every setter. Setters validate first
/// and leave `self` untouched on error.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalParameters {
    definition: OrbitDefinition,
    semi_minor_axis: f64,
    perimeter: f64,
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, OrbitError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OrbitError::NonFinite { field, value })
    }
}

fn speed(field: &'static str, value: f64) -> Result<f64, OrbitError> {
    if finite(field, value)? < 0.0 {
        return Err(OrbitError::NegativeSpeed { field, value });
    }
    Ok(value)
}

pub(crate) fn positive_scale(field: &'static str, value: f64) -> Result<f64, OrbitError> {
    if finite(field, value)? <= 0.0 {
        return Err(OrbitError::NonPositiveScale { field, value });
    }
    Ok(value)
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, OrbitError> {
    if finite(field, value)? < 0.0 {
        return Err(OrbitError::Negative { field, value });
    }
    Ok(value)
}

fn check_axis(semi_major_axis: f64) -> Result<(), OrbitError> {
    if finite("semi_major_axis", semi_major_axis)? <= 0.0 {
        return Err(OrbitError::SemiMajorAxis(semi_major_axis));
    }
    Ok(())
}

fn check_eccentricity(eccentricity: f64) -> Result<(), OrbitError> {
    if !(0.0..1.0).contains(&finite("eccentricity", eccentricity)?) {
        return Err(OrbitError::Eccentricity(eccentricity));
    }
    Ok(())
}

fn check_scales(scales: &OrbitScales) -> Result<(), OrbitError> {
    finite("velocity_scale", scales.velocity)?;
    finite("rotation_scale", scales.rotation)?;
    positive_scale("radius_scale", scales.radius)?;
    positive_scale("orbit_distance_scale", scales.orbit_distance)?;
    Ok(())
}

impl TryFrom<OrbitDefinition> for OrbitalParameters {
    type Error = OrbitError;

    fn try_from(definition: OrbitDefinition) -> Result<Self, Self::Error> {
        check_axis(definition.semi_major_axis)?;
        check_eccentricity(definition.eccentricity)?;
        finite("orbit_period", definition.orbit_period)?;
        speed("min_speed", definition.min_speed)?;
        speed("max_speed", definition.max_speed)?;
        check_scales(&definition.scales)?;

        let mut params = Self {
            definition,
            semi_minor_axis: 0.0,
            perimeter: 0.0,
        };
        params.derive();
        Ok(params)
    }
}

impl OrbitalParameters {
    /// Build parameters for a clockwise orbit with unit scales.
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        orbit_period: f64,
        min_speed: f64,
        max_speed: f64,
    ) -> Result<Self, OrbitError> {
        Self::try_from(OrbitDefinition {
            semi_major_axis,
            eccentricity,
            orbit_period,
            min_speed,
            max_speed,
            ..OrbitDefinition::default()
        })
    }

    fn derive(&mut self) {
        self.semi_minor_axis = mechanics::semi_minor_axis(
            self.definition.semi_major_axis,
            self.definition.eccentricity,
        );
        self.perimeter = mechanics::perimeter(self.definition.semi_major_axis, self.semi_minor_axis);
    }

    pub fn definition(&self) -> &OrbitDefinition {
        &self.definition
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.definition.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.definition.eccentricity
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    pub fn perimeter(&self) -> f64 {
        self.perimeter
    }

    pub fn orbit_period(&self) -> f64 {
        self.definition.orbit_period
    }

    pub fn min_speed(&self) -> f64 {
        self.definition.min_speed
    }

    pub fn max_speed(&self) -> f64 {
        self.definition.max_speed
    }

    pub fn orbit_direction(&self) -> Direction {
        self.definition.orbit_direction
    }

    pub fn spin_direction(&self) -> Direction {
        self.definition.spin_direction
    }

    pub fn scales(&self) -> &OrbitScales {
        &self.definition.scales
    }

    /// Change the semi-major axis and re-derive the ellipse.
    pub fn set_semi_major_axis(&mut self, semi_major_axis: f64) -> Result<(), OrbitError> {
        check_axis(semi_major_axis)?;
        self.definition.semi_major_axis = semi_major_axis;
        self.derive();
        Ok(())
    }

    /// Change the eccentricity and re-derive the ellipse.
    pub fn set_eccentricity(&mut self, eccentricity: f64) -> Result<(), OrbitError> {
        check_eccentricity(eccentricity)?;
        self.definition.eccentricity = eccentricity;
        self.derive();
        Ok(())
    }

    pub fn set_orbit_period(&mut self, orbit_period: f64) -> Result<(), OrbitError> {
        self.definition.orbit_period = finite("orbit_period", orbit_period)?;
        Ok(())
    }

    /// Change both speeds at once so they never disagree mid-edit.
    pub fn set_speeds(&mut self, min_speed: f64, max_speed: f64) -> Result<(), OrbitError> {
        speed("min_speed", min_speed)?;
        speed("max_speed", max_speed)?;
        self.definition.min_speed = min_speed;
        self.definition.max_speed = max_speed;
        Ok(())
    }

    pub fn set_orbit_direction(&mut self, direction: Direction) {
        self.definition.orbit_direction = direction;
    }

    pub fn set_spin_direction(&mut self, direction: Direction) {
        self.definition.spin_direction = direction;
    }

    pub fn set_scales(&mut self, scales: OrbitScales) -> Result<(), OrbitError> {
        check_scales(&scales)?;
        self.definition.scales = scales;
        Ok(())
    }
}
