//! A celestial body: orbit parameters and state plus the physical and
//! presentation values the host needs to place it.

use glam::{DQuat, DVec2, DVec3};
use tracing::debug;

use crate::error::OrbitError;
use crate::params::{
    Direction, OrbitScales, OrbitalParameters, finite, non_negative, positive_scale,
};
use crate::path::{OrbitPathStyle, orbit_path};
use crate::state::{OrbitState, step};
use crate::transition::{Placement, Transition};

/// Seconds a body takes to glide onto a newly edited orbit.
pub const DEFAULT_TRANSITION_DELAY: f64 = 1.0;

/// A planet or moon orbiting a center.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    name: String,
    params: OrbitalParameters,
    state: OrbitState,
    radius: f64,
    axial_tilt_degrees: f64,
    system_scale: f64,
    move_body: bool,
    transition_delay: f64,
    transition: Transition,
    placement: Placement,
    draw_orbit: bool,
    path_style: OrbitPathStyle,
}

impl CelestialBody {
    /// Create a body at angle 0 with a system scale of 1.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is negative or not finite.
    pub fn new(
        name: impl Into<String>,
        params: OrbitalParameters,
        radius: f64,
    ) -> Result<Self, OrbitError> {
        Ok(Self {
            name: name.into(),
            params,
            state: OrbitState::default(),
            radius: non_negative("radius", radius)?,
            axial_tilt_degrees: 0.0,
            system_scale: 1.0,
            move_body: true,
            transition_delay: DEFAULT_TRANSITION_DELAY,
            transition: Transition::Direct,
            placement: Placement::default(),
            draw_orbit: false,
            path_style: OrbitPathStyle::default(),
        })
    }

    pub fn with_axial_tilt(mut self, degrees: f64) -> Result<Self, OrbitError> {
        self.set_axial_tilt(degrees)?;
        Ok(self)
    }

    pub fn with_start_angle(mut self, degrees: f64) -> Result<Self, OrbitError> {
        self.state = OrbitState::at_angle(finite("start_angle", degrees)?);
        Ok(self)
    }

    /// Seconds to glide onto an edited orbit; zero snaps.
    pub fn with_transition_delay(mut self, seconds: f64) -> Result<Self, OrbitError> {
        self.transition_delay = non_negative("transition_delay", seconds)?;
        Ok(self)
    }

    pub fn with_orbit_path(mut self, draw: bool, style: OrbitPathStyle) -> Self {
        self.draw_orbit = draw;
        self.path_style = style;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &OrbitalParameters {
        &self.params
    }

    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn axial_tilt_degrees(&self) -> f64 {
        self.axial_tilt_degrees
    }

    pub fn move_body(&self) -> bool {
        self.move_body
    }

    /// Radius including the system scale and the body's own radius scale.
    /// Satellites use this as their orbit offset.
    pub fn radius_with_scale(&self) -> f64 {
        self.radius * self.system_scale * self.params.scales().radius
    }

    /// Record the system scale and return the resulting world scale of the
    /// body mesh.
    pub fn set_scale(&mut self, scale: f64) -> Result<f64, OrbitError> {
        self.system_scale = positive_scale("system_scale", scale)?;
        Ok(self.radius_with_scale())
    }

    /// Mesh orientation for the axial tilt: a rotation of `-tilt` about +Y.
    pub fn axial_tilt_rotation(&self) -> DQuat {
        DQuat::from_axis_angle(DVec3::Y, -self.axial_tilt_degrees.to_radians())
    }

    pub fn set_axial_tilt(&mut self, degrees: f64) -> Result<(), OrbitError> {
        self.axial_tilt_degrees = finite("axial_tilt", degrees)?;
        Ok(())
    }

    /// Stop or resume following the orbit. Resuming glides from the last
    /// placement.
    pub fn set_move_body(&mut self, move_body: bool) {
        if move_body && !self.move_body {
            self.begin_transition();
        }
        self.move_body = move_body;
    }

    fn begin_transition(&mut self) {
        self.transition = Transition::begin(self.placement, self.transition_delay);
        debug!(body = %self.name, delay = self.transition_delay, "orbit transition started");
    }

    fn edit(
        &mut self,
        apply: impl FnOnce(&mut OrbitalParameters) -> Result<(), OrbitError>,
    ) -> Result<(), OrbitError> {
        apply(&mut self.params)?;
        self.begin_transition();
        Ok(())
    }

    pub fn set_semi_major_axis(&mut self, semi_major_axis: f64) -> Result<(), OrbitError> {
        self.edit(|p| p.set_semi_major_axis(semi_major_axis))
    }

    pub fn set_eccentricity(&mut self, eccentricity: f64) -> Result<(), OrbitError> {
        self.edit(|p| p.set_eccentricity(eccentricity))
    }

    pub fn set_speeds(&mut self, min_speed: f64, max_speed: f64) -> Result<(), OrbitError> {
        self.edit(|p| p.set_speeds(min_speed, max_speed))
    }

    pub fn set_orbit_period(&mut self, orbit_period: f64) -> Result<(), OrbitError> {
        self.edit(|p| p.set_orbit_period(orbit_period))
    }

    pub fn set_scales(&mut self, scales: OrbitScales) -> Result<(), OrbitError> {
        self.edit(|p| p.set_scales(scales))
    }

    pub fn set_orbit_direction(&mut self, direction: Direction) {
        self.params.set_orbit_direction(direction);
        self.begin_transition();
    }

    pub fn set_spin_direction(&mut self, direction: Direction) {
        self.params.set_spin_direction(direction);
    }

    pub fn set_draw_orbit(&mut self, draw: bool) {
        self.draw_orbit = draw;
    }

    pub fn set_path_style(&mut self, style: OrbitPathStyle) {
        self.path_style = style;
    }

    pub fn path_style(&self) -> &OrbitPathStyle {
        &self.path_style
    }

    /// Orbit line points relative to the center, sampled with the offset and
    /// distance scale of the last step. `None` when orbit drawing is off.
    pub fn orbit_path(&self) -> Option<Result<Vec<DVec2>, OrbitError>> {
        self.draw_orbit.then(|| {
            orbit_path(
                &self.params,
                self.path_style.resolution,
                self.state.last_offset,
                self.state.last_distance_scale,
            )
        })
    }

    /// Step the orbit and update the placement.
    ///
    /// `center_position` is the world position of the orbit center, already
    /// updated for this frame; `center_offset` is its scaled radius.
    pub fn advance(
        &mut self,
        center_position: DVec3,
        center_offset: f64,
        time_scale: f64,
        distance_scale: f64,
        delta_seconds: f64,
    ) -> Result<(), OrbitError> {
        self.state = step(
            &self.params,
            &self.state,
            time_scale,
            distance_scale,
            delta_seconds,
            center_offset,
        )?;

        if !self.move_body {
            return Ok(());
        }

        let offset = self.state.relative_position(&self.params);
        let target = Placement {
            position: center_position + offset.extend(0.0),
            rotation_degrees: self.state.rotation_degrees,
        };
        self.placement = self.transition.advance(target, delta_seconds);
        Ok(())
    }
}
