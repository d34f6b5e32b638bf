//! Time system for DeepDig
//!
//! The game advances on two cadences: a render-frame delta fed in by the host
//! loop, and fixed simulation steps drained from an accumulator. Movement
//! resolution runs once per fixed step only.

use serde::{Deserialize, Serialize};

/// Smallest accepted fixed timestep. A zero or negative step would stall
/// the accumulator drain and break the interpolation factor.
const MIN_FIXED_TIMESTEP: f32 = 1e-4;

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for simulation (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Game time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since game start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped, scaled)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Whether the game is paused
    pub paused: bool,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self {
            config: TimeConfig::default(),
            total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            paused: false,
            fixed_accumulator: 0.0,
        }
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(mut config: TimeConfig) -> Self {
        config.fixed_timestep = config.fixed_timestep.max(MIN_FIXED_TIMESTEP);
        Self {
            config,
            ..Default::default()
        }
    }

    /// Update the game time with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.min(self.config.max_delta_time);
        self.frame_count += 1;

        if self.paused {
            self.delta_time = 0.0;
            return;
        }

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }

    /// Duration of one fixed step, in seconds
    pub fn fixed_dt(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Get the interpolation factor for rendering between simulation steps
    pub fn fixed_interpolation(&self) -> f32 {
        self.fixed_accumulator / self.config.fixed_timestep
    }

    /// Pause the game
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the game
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time_update() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);

        time.pause();
        time.update(0.016);
        assert_eq!(time.delta_time, 0.0);
    }

    #[test]
    fn test_fixed_steps_drain_accumulator() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.02,
            ..Default::default()
        });

        time.update(0.05);
        assert_eq!(time.fixed_steps(), 2);
        // Remainder stays below one step until more time accumulates
        assert_eq!(time.fixed_steps(), 0);

        time.update(0.01);
        assert_eq!(time.fixed_steps(), 1);
    }

    #[test]
    fn test_fixed_timestep_clamped_above_zero() {
        let time = GameTime::new(TimeConfig {
            fixed_timestep: 0.0,
            ..Default::default()
        });
        assert!(time.config.fixed_timestep > 0.0);
    }

    #[test]
    fn test_max_delta_clamp() {
        let mut time = GameTime::default();
        time.update(10.0);
        assert_eq!(time.unscaled_delta_time, time.config.max_delta_time);
    }

    #[test]
    fn test_time_scale_stretches_delta() {
        let mut time = GameTime::default();
        time.set_time_scale(2.0);
        time.update(0.01);
        assert!((time.delta_time - 0.02).abs() < 1e-6);
        assert!((time.unscaled_delta_time - 0.01).abs() < 1e-6);
    }
}
