//! Fixed-timestep simulation loop implementing the "Fix Your Timestep" pattern.
//!
//! Decouples orbit stepping (fixed 90 Hz, the usual headset refresh rate)
//! from presentation (variable rate) using an accumulator, and hands the
//! presenter an interpolation alpha.

use tracing::warn;

/// Fixed simulation timestep: 90 Hz.
pub const FIXED_DT: f64 = 1.0 / 90.0;

/// Maximum frame time clamp to prevent spiral of death.
/// If a frame takes longer than this, we clamp and accept slowdown
/// rather than trying to catch up with dozens of simulation steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Fixed-timestep loop state.
///
/// The caller measures each frame and passes its length to
/// [`tick`](Self::tick), so runs are reproducible.
#[derive(Debug, Clone)]
pub struct GameLoop {
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    /// Creates a new `GameLoop` with nothing accumulated.
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Runs one frame of the given length: zero or more fixed-rate updates,
    /// then exactly one render call.
    ///
    /// - `update_fn(fixed_dt, total_sim_time)` is called at the fixed rate; an
    ///   error aborts the frame without rendering.
    /// - `render_fn(alpha)` receives the interpolation alpha in `[0.0, 1.0)`.
    pub fn tick<E>(
        &mut self,
        mut frame_time: f64,
        mut update_fn: impl FnMut(f64, f64) -> Result<(), E>,
        mut render_fn: impl FnMut(f64),
    ) -> Result<(), E> {
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time)?;
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        render_fn(self.alpha());
        self.frame_count += 1;
        Ok(())
    }

    /// Returns the current interpolation alpha without running a tick.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    /// Seconds carried over that have not yet made up a full fixed step.
    pub fn pending_time(&self) -> f64 {
        self.accumulator
    }

    /// Returns the total number of frames rendered.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the total number of simulation update steps executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Returns the total simulation time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn tick(
        loop_: &mut GameLoop,
        frame_time: f64,
        mut update_fn: impl FnMut(f64, f64),
        render_fn: impl FnMut(f64),
    ) {
        loop_
            .tick::<Infallible>(
                frame_time,
                |dt, t| {
                    update_fn(dt, t);
                    Ok(())
                },
                render_fn,
            )
            .unwrap();
    }

    #[test]
    fn test_accumulator_single_step() {
        let mut loop_ = GameLoop::new();
        let mut updates = 0u32;
        tick(&mut loop_, FIXED_DT, |_, _| updates += 1, |_| {});
        assert_eq!(updates, 1);
        assert!(loop_.pending_time().abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_multiple_steps() {
        let mut loop_ = GameLoop::new();
        let mut updates = 0u32;
        tick(&mut loop_, 3.0 * FIXED_DT + 1e-9, |_, _| updates += 1, |_| {});
        assert_eq!(updates, 3);
        assert!((loop_.total_sim_time() - 3.0 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_partial() {
        let mut loop_ = GameLoop::new();
        let mut updates = 0u32;
        let mut render_called = false;
        tick(
            &mut loop_,
            0.5 * FIXED_DT,
            |_, _| updates += 1,
            |_| render_called = true,
        );
        assert_eq!(updates, 0);
        assert!(render_called);
        assert!((loop_.alpha() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_max_frame_time_clamp() {
        let mut loop_ = GameLoop::new();
        let mut updates = 0u32;
        tick(&mut loop_, 1.0, |_, _| updates += 1, |_| {});
        let max_updates = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(updates <= max_updates, "{updates} > {max_updates}");
        assert!(updates > 0);
    }

    #[test]
    fn test_update_error_aborts_frame() {
        let mut loop_ = GameLoop::new();
        let mut rendered = false;
        let result = loop_.tick(
            2.0 * FIXED_DT,
            |_, _| Err("boom"),
            |_| rendered = true,
        );
        assert_eq!(result, Err("boom"));
        assert!(!rendered);
        assert_eq!(loop_.update_count(), 0);
    }

    #[test]
    fn test_deterministic_sequence() {
        let frame_times = [0.011, 0.015, 0.020, 0.009, 0.033, 0.008, 0.012];

        let mut loop_a = GameLoop::new();
        let mut loop_b = GameLoop::new();
        for &ft in &frame_times {
            let mut alpha_a = 0.0;
            let mut alpha_b = 0.0;
            tick(&mut loop_a, ft, |_, _| {}, |a| alpha_a = a);
            tick(&mut loop_b, ft, |_, _| {}, |a| alpha_b = a);
            assert!((alpha_a - alpha_b).abs() < 1e-15);
        }
        assert_eq!(loop_a.update_count(), loop_b.update_count());
        assert_eq!(loop_a.frame_count(), frame_times.len() as u64);
    }

    #[test]
    fn test_game_loop_default() {
        let loop_ = GameLoop::default();
        assert_eq!(loop_.frame_count(), 0);
        assert_eq!(loop_.update_count(), 0);
        assert_eq!(loop_.total_sim_time(), 0.0);
    }
}
