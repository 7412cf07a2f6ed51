//! Per-body orbit state and the per-tick step.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::OrbitError;
use crate::mechanics;
use crate::params::OrbitalParameters;

/// Mutable orbit progress of a single body.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrbitState {
    /// Position along the orbit in degrees, always in `[0, 360)`.
    pub angle_degrees: f64,
    /// Linear speed evaluated at the start of the last step.
    pub current_speed: f64,
    /// Axial rotation in degrees.
    pub rotation_degrees: f64,
    /// Center radius used as orbit offset in the last step.
    pub last_offset: f64,
    /// System distance scale used in the last step.
    pub last_distance_scale: f64,
}

impl OrbitState {
    /// State starting at the given angle, wrapped into `[0, 360)`.
    pub fn at_angle(angle_degrees: f64) -> Self {
        Self {
            angle_degrees: wrap_degrees(angle_degrees),
            last_distance_scale: 1.0,
            ..Self::default()
        }
    }

    /// Offset from the orbit center at the current angle, using the offset
    /// and distance scale recorded by the last step.
    pub fn relative_position(&self, params: &OrbitalParameters) -> DVec2 {
        mechanics::position(
            params.semi_major_axis(),
            params.semi_minor_axis(),
            self.angle_degrees.to_radians(),
            self.last_offset,
            self.last_distance_scale,
            params.scales().orbit_distance,
            params.orbit_direction(),
        )
    }

    /// Distance from the focus at the current angle, unscaled.
    pub fn focal_distance(&self, params: &OrbitalParameters) -> f64 {
        mechanics::distance(
            params.semi_major_axis(),
            params.eccentricity(),
            self.angle_degrees.to_radians(),
        )
    }
}

/// Wrap an angle into `[0, 360)`.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Arc length covered by one degree of orbit at the given system scale.
pub fn distance_per_degree(params: &OrbitalParameters, distance_scale: f64) -> f64 {
    params.perimeter() * distance_scale * params.scales().orbit_distance / 360.0
}

/// Advance a body along its orbit by `delta_seconds`.
///
/// The speed is sampled at the current angle, converted to degrees through
/// the arc length per degree, and the angle wraps into `[0, 360)`. The
/// rotation is recomputed for the new angle and `center_offset` /
/// `distance_scale` are recorded for [`OrbitState::relative_position`].
///
/// # Errors
///
/// Returns [`OrbitError::DegenerateDistancePerDegree`] when the arc length per
/// degree is zero or not finite (e.g. a zero `distance_scale`), and
/// [`OrbitError::NonFinite`] for a non-finite time input. `state` is not
/// modified on error.
pub fn step(
    params: &OrbitalParameters,
    state: &OrbitState,
    time_scale: f64,
    distance_scale: f64,
    delta_seconds: f64,
    center_offset: f64,
) -> Result<OrbitState, OrbitError> {
    if !time_scale.is_finite() {
        return Err(OrbitError::NonFinite {
            field: "time_scale",
            value: time_scale,
        });
    }
    if !delta_seconds.is_finite() {
        return Err(OrbitError::NonFinite {
            field: "delta_seconds",
            value: delta_seconds,
        });
    }

    let km_per_degree = distance_per_degree(params, distance_scale);
    if km_per_degree == 0.0 || !km_per_degree.is_finite() {
        return Err(OrbitError::DegenerateDistancePerDegree(km_per_degree));
    }

    let scales = params.scales();
    let speed = mechanics::velocity(
        params.min_speed(),
        params.max_speed(),
        state.angle_degrees.to_radians(),
        scales.velocity,
    );

    let travelled =
        speed * distance_scale * scales.orbit_distance * time_scale * delta_seconds;
    let angle_degrees = wrap_degrees(state.angle_degrees + travelled / km_per_degree);

    let rotation = mechanics::rotation(
        params.orbit_period(),
        scales.rotation,
        angle_degrees.to_radians(),
        params.spin_direction(),
    );

    Ok(OrbitState {
        angle_degrees,
        current_speed: speed,
        rotation_degrees: rotation.to_degrees(),
        last_offset: center_offset,
        last_distance_scale: distance_scale,
    })
}
