//! DeepDig Core - Shared utilities for the DeepDig game
//!
//! This crate provides the foundational pieces the gameplay crates build on:
//! - Mathematical primitives (re-exported from glam)
//! - Frame/fixed-step time tracking driving the simulation cadence
//! - Frame-driven timers

pub mod time;
pub mod timer;

pub use glam::Vec2;
pub use time::{GameTime, TimeConfig};
pub use timer::{Timer, TimerError, TimerId, TimerSet};
