//! Static orbit path sampling for visualization.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::OrbitError;
use crate::mechanics;
use crate::params::OrbitalParameters;

/// Drawing style for an orbit line. The points come from [`orbit_path`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitPathStyle {
    /// Number of samples around the orbit.
    pub resolution: u32,
    /// Line thickness in world units.
    pub line_radius: f32,
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl Default for OrbitPathStyle {
    fn default() -> Self {
        Self {
            resolution: 50,
            line_radius: 40.0,
            color: [1.0, 1.0, 1.0, 0.25],
        }
    }
}

/// Sample `resolution` points around the orbit, relative to its center.
///
/// Sample `i` sits at `2pi (i + 1) / resolution`, so the last point closes
/// the loop at angle 0.
///
/// # Errors
///
/// Returns [`OrbitError::ZeroResolution`] when `resolution` is 0.
pub fn orbit_path(
    params: &OrbitalParameters,
    resolution: u32,
    offset: f64,
    distance_scale: f64,
) -> Result<Vec<DVec2>, OrbitError> {
    if resolution == 0 {
        return Err(OrbitError::ZeroResolution);
    }

    let points = (0..resolution)
        .map(|i| {
            let radians = TAU * f64::from(i + 1) / f64::from(resolution);
            mechanics::position(
                params.semi_major_axis(),
                params.semi_minor_axis(),
                radians,
                offset,
                distance_scale,
                params.scales().orbit_distance,
                params.orbit_direction(),
            )
        })
        .collect();
    Ok(points)
}
