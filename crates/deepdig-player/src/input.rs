//! Input sampling for the player
//!
//! Sits between the host's raw input signals and the fixed-step resolver.
//! The jump press edge is latched here, so a press landing between two
//! physics ticks is delivered exactly once, on the next tick, and a press
//! and release inside the same tick still reads as a tap.
//!
//! Binding physical devices to these signals is the host's concern.

use glam::Vec2;

use crate::movement::MovementTuning;

/// Conditioned input for one physics tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Conditioned move axis, each component in [-1, 1]
    pub move_axis: Vec2,
    /// True on the tick that consumes a latched jump press
    pub jump_pressed: bool,
    /// True while the jump input is held
    pub jump_held: bool,
}

/// Latching input sampler.
///
/// The host pushes raw signals at frame cadence or faster; the simulation
/// pulls one [`TickInput`] per physics tick via [`sample`](Self::sample).
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    move_axis: Vec2,
    jump_pressed: bool,
    jump_held: bool,
}

impl InputSampler {
    /// Create a sampler with everything released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw move axis, each component in [-1, 1].
    pub fn set_move_axis(&mut self, axis: Vec2) {
        self.move_axis = axis;
    }

    /// Record a jump press. Latched until the next [`sample`](Self::sample).
    pub fn press_jump(&mut self) {
        self.jump_pressed = true;
        self.jump_held = true;
    }

    /// Record a jump release.
    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }

    /// Produce the input for one physics tick, consuming the press latch.
    ///
    /// Deadzone and snap conditioning happen here, at sampling time, so
    /// buffered-jump timing is measured from the true press edge rather
    /// than from somewhere inside the physics step.
    pub fn sample(&mut self, tuning: &MovementTuning) -> TickInput {
        let input = TickInput {
            move_axis: condition_axes(self.move_axis, tuning),
            jump_pressed: self.jump_pressed,
            jump_held: self.jump_held,
        };
        self.jump_pressed = false;
        input
    }
}

fn condition_axes(raw: Vec2, tuning: &MovementTuning) -> Vec2 {
    Vec2::new(
        condition_axis(raw.x, tuning.horizontal_dead_zone, tuning.snap_input),
        condition_axis(raw.y, tuning.vertical_dead_zone, tuning.snap_input),
    )
}

fn condition_axis(value: f32, dead_zone: f32, snap: bool) -> f32 {
    if value.abs() < dead_zone {
        0.0
    } else if snap {
        value.signum()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_latch_consumed_once() {
        let tuning = MovementTuning::default();
        let mut sampler = InputSampler::new();

        sampler.press_jump();
        let first = sampler.sample(&tuning);
        let second = sampler.sample(&tuning);

        assert!(first.jump_pressed);
        assert!(first.jump_held);
        assert!(!second.jump_pressed);
        assert!(second.jump_held);
    }

    #[test]
    fn tap_within_one_tick_reads_as_press_without_hold() {
        let tuning = MovementTuning::default();
        let mut sampler = InputSampler::new();

        sampler.press_jump();
        sampler.release_jump();
        let input = sampler.sample(&tuning);

        assert!(input.jump_pressed);
        assert!(!input.jump_held);
    }

    #[test]
    fn snap_collapses_axis_to_sign() {
        let tuning = MovementTuning {
            snap_input: true,
            horizontal_dead_zone: 0.1,
            ..Default::default()
        };
        let mut sampler = InputSampler::new();

        sampler.set_move_axis(Vec2::new(0.7, 0.0));
        assert_eq!(sampler.sample(&tuning).move_axis.x, 1.0);

        sampler.set_move_axis(Vec2::new(-0.4, 0.0));
        assert_eq!(sampler.sample(&tuning).move_axis.x, -1.0);
    }

    #[test]
    fn dead_zone_zeroes_small_input() {
        let tuning = MovementTuning {
            snap_input: false,
            horizontal_dead_zone: 0.1,
            vertical_dead_zone: 0.3,
            ..Default::default()
        };
        let mut sampler = InputSampler::new();

        sampler.set_move_axis(Vec2::new(0.05, 0.2));
        assert_eq!(sampler.sample(&tuning).move_axis, Vec2::ZERO);
    }

    #[test]
    fn unsnapped_axis_passes_through_above_dead_zone() {
        let tuning = MovementTuning {
            snap_input: false,
            horizontal_dead_zone: 0.1,
            ..Default::default()
        };
        let mut sampler = InputSampler::new();

        sampler.set_move_axis(Vec2::new(0.6, 0.0));
        assert_eq!(sampler.sample(&tuning).move_axis.x, 0.6);
    }
}
