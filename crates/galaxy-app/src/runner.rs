//! Headless driver: steps a [`SolarSystem`] through the fixed-timestep loop
//! and reports progress.

use std::path::Path;

use galaxy_config::SimulationConfig;
use galaxy_orbit::{OrbitError, SolarSystem, SystemSnapshot};
use tracing::{info, info_span};

use crate::game_loop::{FIXED_DT, GameLoop};

/// Frame length fed to the loop in headless runs. Deliberately off the fixed
/// step so the accumulator carries remainders like a real display would.
pub const HEADLESS_FRAME_TIME: f64 = 1.0 / 72.0;

/// Errors from a headless run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("simulation step failed: {0}")]
    Step(#[from] OrbitError),
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to write snapshot: {0}")]
    Write(#[from] std::io::Error),
}

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub frames: u64,
    pub updates: u64,
    pub snapshot: SystemSnapshot,
}

fn report(system: &SolarSystem) {
    for (_, body) in system.bodies() {
        let position = body.placement().position;
        info!(
            body = body.name(),
            angle = body.state().angle_degrees,
            speed = body.state().current_speed,
            x = position.x,
            y = position.y,
            "orbit"
        );
    }
}

/// Run `system` for `settings.duration_seconds` of loop time, logging every
/// `settings.report_interval_seconds`.
pub fn run_headless(
    system: &mut SolarSystem,
    settings: &SimulationConfig,
) -> Result<RunReport, RunError> {
    let _span = info_span!("headless", duration = settings.duration_seconds).entered();
    let mut game_loop = GameLoop::new();
    let mut next_report = settings.report_interval_seconds;
    let target_updates = (settings.duration_seconds / FIXED_DT + 1e-6).floor() as u64;

    while game_loop.update_count() < target_updates {
        // The last frame is cut short so it completes exactly the remaining
        // steps; the small pad absorbs rounding in the accumulator.
        let remaining = (target_updates - game_loop.update_count()) as f64 * FIXED_DT;
        let frame_time = HEADLESS_FRAME_TIME.min(remaining - game_loop.pending_time() + 1e-9);
        game_loop.tick(
            frame_time,
            |dt, _| system.step(settings.time_scale, settings.distance_scale, dt),
            |_alpha| {},
        )?;

        if game_loop.total_sim_time() >= next_report {
            info!(elapsed = game_loop.total_sim_time(), "report");
            report(system);
            next_report += settings.report_interval_seconds;
        }
    }

    info!(
        frames = game_loop.frame_count(),
        updates = game_loop.update_count(),
        "run finished"
    );
    Ok(RunReport {
        frames: game_loop.frame_count(),
        updates: game_loop.update_count(),
        snapshot: system.snapshot(),
    })
}

/// Write a snapshot as pretty RON.
pub fn write_snapshot(snapshot: &SystemSnapshot, path: &Path) -> Result<(), RunError> {
    let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
    let serialized = ron::ser::to_string_pretty(snapshot, pretty)?;
    std::fs::write(path, serialized)?;
    info!("Wrote snapshot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_config::Config;

    #[test]
    fn test_run_covers_duration() {
        let mut config = Config::default();
        config.simulation.duration_seconds = 2.0;
        config.simulation.time_scale = 10_000.0;
        let mut system = config.build_system().unwrap();

        let report = run_headless(&mut system, &config.simulation).unwrap();
        assert_eq!(report.updates, 180);
        assert!((report.snapshot.elapsed_seconds - 2.0).abs() < 1e-9);
        for body in &report.snapshot.bodies {
            assert!((0.0..360.0).contains(&body.angle_degrees));
        }
    }

    #[test]
    fn test_run_never_overshoots_duration() {
        let mut config = Config::default();
        for duration in [0.01, 0.5, 1.0 / 3.0, 7.25] {
            config.simulation.duration_seconds = duration;
            let mut system = config.build_system().unwrap();
            let report = run_headless(&mut system, &config.simulation).unwrap();
            let expected = (duration / FIXED_DT + 1e-6).floor() as u64;
            assert_eq!(report.updates, expected, "duration {duration}");
            assert!(report.snapshot.elapsed_seconds <= duration + 1e-9);
        }
    }

    #[test]
    fn test_zero_duration_does_nothing() {
        let mut config = Config::default();
        config.simulation.duration_seconds = 0.0;
        let mut system = config.build_system().unwrap();
        let report = run_headless(&mut system, &config.simulation).unwrap();
        assert_eq!(report.updates, 0);
    }

    #[test]
    fn test_step_error_surfaces() {
        let config = Config::default();
        let mut system = config.build_system().unwrap();
        let settings = SimulationConfig {
            distance_scale: 0.0,
            duration_seconds: 1.0,
            ..SimulationConfig::default()
        };
        let result = run_headless(&mut system, &settings);
        assert!(matches!(
            result,
            Err(RunError::Step(OrbitError::DegenerateDistancePerDegree(_)))
        ));
    }

    #[test]
    fn test_write_snapshot_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.ron");
        let mut system = Config::default().build_system().unwrap();
        system.step(100.0, 1.0, FIXED_DT).unwrap();
        let snapshot = system.snapshot();

        write_snapshot(&snapshot, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: SystemSnapshot = ron::from_str(&contents).unwrap();
        assert_eq!(parsed.bodies.len(), snapshot.bodies.len());
        assert_eq!(parsed.bodies[1].parent.as_deref(), Some("Earth"));
    }
}
