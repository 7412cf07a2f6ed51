//! Closed-form ellipse and motion formulas used by the orbit stepper.
//!
//! Angles passed in are radians. All functions are pure and total over finite
//! inputs; validation happens when [`OrbitalParameters`](crate::OrbitalParameters)
//! are built.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

use crate::params::Direction;

/// Semi-minor axis of an ellipse: `b = a * sqrt(1 - e^2)`.
pub fn semi_minor_axis(semi_major_axis: f64, eccentricity: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt()
}

/// Ellipse perimeter using Ramanujan's second approximation:
///
/// `p = pi (a + b) (1 + 3h / (10 + sqrt(4 - 3h)))`, `h = ((a - b) / (a + b))^2`
///
/// Exact for circles and within a few parts per million for any eccentricity
/// below 0.99. Returns 0 for a degenerate ellipse with `a + b == 0`.
pub fn perimeter(semi_major_axis: f64, semi_minor_axis: f64) -> f64 {
    let sum = semi_major_axis + semi_minor_axis;
    if sum == 0.0 {
        return 0.0;
    }
    let h = ((semi_major_axis - semi_minor_axis) / sum).powi(2);
    PI * sum * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

/// Distance from the focus in polar form: `r = a (1 - e^2) / (1 + e cos(theta))`.
///
/// `theta = 0` is perihelion, `theta = pi` aphelion.
pub fn distance(semi_major_axis: f64, eccentricity: f64, radians: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentricity) / (1.0 + eccentricity * radians.cos())
}

/// Linear orbital speed at an angle, easing from `min_speed` at 0 to
/// `max_speed` at pi.
pub fn velocity(min_speed: f64, max_speed: f64, radians: f64, velocity_scale: f64) -> f64 {
    (min_speed + (max_speed - min_speed) * (radians / 2.0).sin()) * velocity_scale
}

/// Offset from the orbit center at an angle.
///
/// `offset` is the scaled radius of the center body, so the orbit clears its
/// surface. The caller adds the center's world position.
pub fn position(
    semi_major_axis: f64,
    semi_minor_axis: f64,
    radians: f64,
    offset: f64,
    distance_scale: f64,
    orbit_distance_scale: f64,
    direction: Direction,
) -> DVec2 {
    let scale = distance_scale * orbit_distance_scale;
    let x = -(offset + semi_major_axis * scale) * radians.cos();
    let y = (offset + semi_minor_axis * scale) * radians.sin();
    match direction {
        Direction::Clockwise => DVec2::new(x, y),
        Direction::CounterClockwise => DVec2::new(x, -y),
    }
}

/// Axial rotation in radians for an orbit angle.
///
/// The body spins `orbit_period * rotation_scale` times per revolution; the
/// fractional turn is mapped back to `[0, 2pi)` and negated for
/// counter-clockwise spin.
pub fn rotation(orbit_period: f64, rotation_scale: f64, radians: f64, spin: Direction) -> f64 {
    let turns = (orbit_period * rotation_scale * (radians / TAU)) % 1.0;
    let rotation = turns * TAU;
    match spin {
        Direction::Clockwise => rotation,
        Direction::CounterClockwise => -rotation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_semi_minor_axis_never_exceeds_major() {
        for a in [0.001, 1.0, 10.0, 149.6, 1.0e9] {
            for i in 0..100 {
                let e = i as f64 / 100.0;
                let b = semi_minor_axis(a, e);
                assert!(b <= a, "a={a} e={e} b={b}");
                assert!(b > 0.0);
            }
        }
    }

    #[test]
    fn test_semi_minor_axis_circle() {
        assert!((semi_minor_axis(10.0, 0.0) - 10.0).abs() < EPS);
        let b = semi_minor_axis(10.0, 0.6);
        assert!((b - 8.0).abs() < EPS, "b={b}");
    }

    #[test]
    fn test_perimeter_of_circle() {
        let p = perimeter(10.0, 10.0);
        assert!((p - TAU * 10.0).abs() < EPS, "p={p}");
    }

    #[test]
    fn test_perimeter_matches_known_ellipse() {
        // a=5, b=3 has a perimeter of 25.526998863...
        let p = perimeter(5.0, 3.0);
        assert!((p - 25.526_998_863).abs() < 1e-6, "p={p}");
    }

    #[test]
    fn test_perimeter_flat_ellipse_tends_to_4a() {
        let p = perimeter(1.0, 0.0);
        assert!((p - 4.0).abs() < 0.002, "p={p}");
    }

    #[test]
    fn test_perimeter_degenerate_is_zero() {
        assert_eq!(perimeter(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_distance_perihelion_and_aphelion() {
        for (a, e) in [(10.0, 0.0), (10.0, 0.5), (1.0, 0.0167), (30.0, 0.95)] {
            let peri = distance(a, e, 0.0);
            let aph = distance(a, e, PI);
            assert!((peri - a * (1.0 - e)).abs() < 1e-9 * a, "peri={peri}");
            assert!((aph - a * (1.0 + e)).abs() < 1e-9 * a, "aph={aph}");
        }
    }

    #[test]
    fn test_distance_examples() {
        assert!((distance(10.0, 0.0, 0.0) - 10.0).abs() < EPS);
        assert!((distance(10.0, 0.5, 0.0) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_velocity_examples() {
        assert!((velocity(1.0, 3.0, PI, 1.0) - 3.0).abs() < EPS);
        assert!((velocity(1.0, 3.0, 0.0, 1.0) - 1.0).abs() < EPS);
        assert!((velocity(1.0, 3.0, PI, 2.0) - 6.0).abs() < EPS);
    }

    #[test]
    fn test_position_is_periodic() {
        for i in 0..32 {
            let theta = i as f64 * 0.37;
            let p0 = position(10.0, 8.0, theta, 1.5, 2.0, 0.5, Direction::Clockwise);
            let p1 = position(10.0, 8.0, theta + TAU, 1.5, 2.0, 0.5, Direction::Clockwise);
            assert!((p0 - p1).length() < 1e-9, "theta={theta}: {p0} vs {p1}");
        }
    }

    #[test]
    fn test_position_axes() {
        let start = position(10.0, 8.0, 0.0, 0.0, 1.0, 1.0, Direction::Clockwise);
        assert!((start - DVec2::new(-10.0, 0.0)).length() < EPS);

        let quarter = position(10.0, 8.0, PI / 2.0, 1.0, 1.0, 1.0, Direction::Clockwise);
        assert!((quarter - DVec2::new(0.0, 9.0)).length() < EPS, "{quarter}");
    }

    #[test]
    fn test_position_direction_mirrors_y() {
        let cw = position(10.0, 8.0, 1.0, 0.5, 1.0, 1.0, Direction::Clockwise);
        let ccw = position(10.0, 8.0, 1.0, 0.5, 1.0, 1.0, Direction::CounterClockwise);
        assert!((cw.x - ccw.x).abs() < EPS);
        assert!((cw.y + ccw.y).abs() < EPS);
    }

    #[test]
    fn test_rotation_wraps_each_spin() {
        // Two spins per orbit: half an orbit is one full turn, back to zero.
        let r = rotation(2.0, 1.0, PI, Direction::Clockwise);
        assert!(r.abs() < 1e-9, "r={r}");

        let quarter = rotation(1.0, 1.0, PI / 2.0, Direction::Clockwise);
        assert!((quarter - PI / 2.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_counter_clockwise_is_negated() {
        let cw = rotation(365.25, 1.0, 0.3, Direction::Clockwise);
        let ccw = rotation(365.25, 1.0, 0.3, Direction::CounterClockwise);
        assert!((cw + ccw).abs() < EPS);
        assert!((0.0..TAU).contains(&cw));
    }
}
