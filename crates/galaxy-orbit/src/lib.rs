//! Orbital mechanics for planets and moons.
//!
//! Computes elliptical orbit geometry, angular motion, axial rotation and
//! placement over time for bodies orbiting a center. The host engine calls
//! [`SolarSystem::step`] (or [`step`] directly) once per tick and reads back
//! each body's [`Placement`]. Parameter edits go through the setters on
//! [`OrbitalParameters`] / [`CelestialBody`], which validate and re-derive the
//! ellipse.

pub mod body;
pub mod error;
pub mod mechanics;
pub mod params;
pub mod path;
pub mod state;
pub mod system;
pub mod transition;

pub use body::{CelestialBody, DEFAULT_TRANSITION_DELAY};
pub use error::OrbitError;
pub use params::{Direction, OrbitDefinition, OrbitScales, OrbitalParameters};
pub use path::{OrbitPathStyle, orbit_path};
pub use state::{OrbitState, distance_per_degree, step, wrap_degrees};
pub use system::{BodyId, BodySnapshot, SolarSystem, Star, SystemSnapshot};
pub use transition::{Placement, Transition};
