//! Galaxy simulation application framework.
//!
//! Provides platform directories, the fixed-timestep loop, and the headless
//! runner used by the `galaxy` binary.

pub mod game_loop;
pub mod platform;
pub mod runner;
