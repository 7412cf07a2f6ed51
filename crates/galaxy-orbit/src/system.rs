//! Star system: a central star and bodies stepped centers-first.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::body::CelestialBody;
use crate::error::OrbitError;
use crate::params::{finite, non_negative, positive_scale};

/// Index of a body within its [`SolarSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub usize);

/// The fixed center of the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Star {
    pub name: String,
    pub radius: f64,
    pub position: DVec3,
}

impl Default for Star {
    fn default() -> Self {
        Self {
            name: "Sun".to_string(),
            radius: 6.96,
            position: DVec3::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    body: CelestialBody,
    parent: Option<BodyId>,
}

/// Per-body values at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub name: String,
    pub parent: Option<String>,
    pub position: DVec3,
    pub rotation_degrees: f64,
    pub angle_degrees: f64,
    pub speed: f64,
}

/// Whole-system state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub elapsed_seconds: f64,
    pub star: Star,
    pub bodies: Vec<BodySnapshot>,
}

/// Star plus its orbiting bodies.
///
/// Bodies are stored in insertion order, and a satellite can only be added
/// after its parent, so iterating in order always steps a center before the
/// bodies that orbit it.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    star: Star,
    slots: Vec<Slot>,
    scale: f64,
    elapsed_seconds: f64,
}

fn check_position(position: DVec3) -> Result<DVec3, OrbitError> {
    for value in position.to_array() {
        finite("star_position", value)?;
    }
    Ok(position)
}

impl SolarSystem {
    /// # Errors
    ///
    /// Returns an error if the star radius is negative or the star radius or
    /// position is not finite.
    pub fn new(star: Star) -> Result<Self, OrbitError> {
        non_negative("star_radius", star.radius)?;
        check_position(star.position)?;
        Ok(Self {
            star,
            slots: Vec::new(),
            scale: 1.0,
            elapsed_seconds: 0.0,
        })
    }

    pub fn star(&self) -> &Star {
        &self.star
    }

    /// Move the star. Bodies follow on the next step.
    pub fn set_star_position(&mut self, position: DVec3) -> Result<(), OrbitError> {
        self.star.position = check_position(position)?;
        Ok(())
    }

    /// Star radius including the system scale.
    pub fn star_radius_with_scale(&self) -> f64 {
        self.star.radius * self.scale
    }

    /// Add a body orbiting the star (`parent == None`) or another body.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitError::UnknownParent`] if `parent` has not been added.
    pub fn add_body(
        &mut self,
        mut body: CelestialBody,
        parent: Option<BodyId>,
    ) -> Result<BodyId, OrbitError> {
        if let Some(parent) = parent
            && parent.0 >= self.slots.len()
        {
            return Err(OrbitError::UnknownParent(parent));
        }

        body.set_scale(self.scale)?;
        let id = BodyId(self.slots.len());
        debug!(body = body.name(), id = id.0, ?parent, "added body");
        self.slots.push(Slot { body, parent });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.slots.get(id.0).map(|slot| &slot.body)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.slots.get_mut(id.0).map(|slot| &mut slot.body)
    }

    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.slots.get(id.0).and_then(|slot| slot.parent)
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.slots
            .iter()
            .position(|slot| slot.body.name() == name)
            .map(BodyId)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (BodyId(i), &slot.body))
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// Apply a system-wide size scale to the star and every body.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving every scale unchanged, if `scale` is not
    /// positive and finite.
    pub fn set_scale(&mut self, scale: f64) -> Result<(), OrbitError> {
        self.scale = positive_scale("system_scale", scale)?;
        for slot in &mut self.slots {
            slot.body.set_scale(scale)?;
        }
        Ok(())
    }

    /// Advance every body by one tick, centers before satellites.
    ///
    /// # Errors
    ///
    /// Stops at the first body whose step fails and returns its error. Bodies
    /// already stepped this tick keep their new state.
    pub fn step(
        &mut self,
        time_scale: f64,
        distance_scale: f64,
        delta_seconds: f64,
    ) -> Result<(), OrbitError> {
        for i in 0..self.slots.len() {
            let (center_position, center_offset) = match self.slots[i].parent {
                Some(parent) => {
                    let center = &self.slots[parent.0].body;
                    (center.placement().position, center.radius_with_scale())
                }
                None => (self.star.position, self.star_radius_with_scale()),
            };

            let body = &mut self.slots[i].body;
            body.advance(
                center_position,
                center_offset,
                time_scale,
                distance_scale,
                delta_seconds,
            )?;
            trace!(
                body = body.name(),
                angle = body.state().angle_degrees,
                "stepped"
            );
        }
        self.elapsed_seconds += delta_seconds;
        Ok(())
    }

    pub fn snapshot(&self) -> SystemSnapshot {
        let bodies = self
            .slots
            .iter()
            .map(|slot| BodySnapshot {
                name: slot.body.name().to_string(),
                parent: slot
                    .parent
                    .map(|p| self.slots[p.0].body.name().to_string()),
                position: slot.body.placement().position,
                rotation_degrees: slot.body.placement().rotation_degrees,
                angle_degrees: slot.body.state().angle_degrees,
                speed: slot.body.state().current_speed,
            })
            .collect();

        SystemSnapshot {
            elapsed_seconds: self.elapsed_seconds,
            star: self.star.clone(),
            bodies,
        }
    }
}
