//! Orbit error types.

use crate::system::BodyId;

/// Errors raised when orbital parameters are built, edited or stepped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrbitError {
    /// Eccentricity outside `[0, 1)`; the orbit would not be a closed ellipse.
    #[error("eccentricity must be in [0, 1), got {0}")]
    Eccentricity(f64),

    /// Semi-major axis must be strictly positive.
    #[error("semi-major axis must be positive, got {0}")]
    SemiMajorAxis(f64),

    /// A parameter was NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Orbital speeds cannot be negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeSpeed {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A radius or delay was negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A scale factor that divides the step was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositiveScale {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The arc length of one degree of orbit is zero or not finite.
    #[error("orbit distance per degree is degenerate ({0}); check perimeter and distance scale")]
    DegenerateDistancePerDegree(f64),

    /// An orbit path needs at least one sample.
    #[error("orbit path resolution must be at least 1")]
    ZeroResolution,

    /// A satellite was added before its center.
    #[error("unknown parent body {0:?}")]
    UnknownParent(BodyId),
}
