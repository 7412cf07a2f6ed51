//! Smooth blending from a body's current placement into its computed orbit
//! placement, used after a parameter edit or when movement is re-enabled.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::state::wrap_degrees;

/// Where the host should draw a body: world position and yaw in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub position: DVec3,
    pub rotation_degrees: f64,
}

impl Placement {
    /// Linear interpolation of position; rotation turns along the shorter
    /// arc and stays in `[0, 360)`.
    pub fn lerp(&self, target: &Placement, t: f64) -> Placement {
        let delta =
            (target.rotation_degrees - self.rotation_degrees + 180.0).rem_euclid(360.0) - 180.0;
        Placement {
            position: self.position.lerp(target.position, t),
            rotation_degrees: wrap_degrees(self.rotation_degrees + delta * t),
        }
    }
}

/// Sine ease-out: `sin(t * pi / 2)` for t in [0, 1].
fn ease_out(t: f64) -> f64 {
    (t.clamp(0.0, 1.0) * std::f64::consts::FRAC_PI_2).sin()
}

/// Two-state blend machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transition {
    /// Placement follows the orbit exactly.
    #[default]
    Direct,
    /// Placement blends from `start` to the orbit over `delay` seconds.
    Transitioning {
        start: Placement,
        timer: f64,
        delay: f64,
    },
}

impl Transition {
    /// Start blending from `start`. A non-positive delay snaps immediately.
    pub fn begin(start: Placement, delay: f64) -> Self {
        if delay > 0.0 {
            Transition::Transitioning {
                start,
                timer: 0.0,
                delay,
            }
        } else {
            Transition::Direct
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, Transition::Transitioning { .. })
    }

    /// Advance the timer by `delta_seconds` and return the placement to use
    /// this frame. Once the timer reaches the delay the machine returns to
    /// [`Transition::Direct`] and the target is returned unchanged.
    pub fn advance(&mut self, target: Placement, delta_seconds: f64) -> Placement {
        match *self {
            Transition::Direct => target,
            Transition::Transitioning {
                start,
                timer,
                delay,
            } => {
                let timer = (timer + delta_seconds).min(delay);
                let blend = ease_out(timer / delay);
                if timer >= delay {
                    *self = Transition::Direct;
                } else {
                    *self = Transition::Transitioning {
                        start,
                        timer,
                        delay,
                    };
                }
                start.lerp(&target, blend)
            }
        }
    }
}
