//! Movement tuning and constants

use serde::{Deserialize, Serialize};

/// Errors produced when validating a [`MovementTuning`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum TuningError {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveRate { name: &'static str, value: f32 },

    #[error("{name} must lie in [0, 1), got {value}")]
    DeadZoneOutOfRange { name: &'static str, value: f32 },

    #[error("{name} must be a non-negative finite duration, got {value}")]
    InvalidWindow { name: &'static str, value: f32 },

    #[error("jump_end_early_gravity_modifier must be at least 1, got {0}")]
    WeakEarlyReleaseModifier(f32),

    #[error("grounding_force must not point upward, got {0}")]
    UpwardGroundingForce(f32),
}

/// Movement tuning for the player character.
///
/// Immutable once handed to the resolver. Speeds are in units per second,
/// accelerations in units per second squared, windows in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementTuning {
    /// Collapse each move axis to -1/0/+1 once it clears its deadzone
    pub snap_input: bool,
    /// Minimum |x| before horizontal input registers
    pub horizontal_dead_zone: f32,
    /// Minimum |y| before vertical input registers
    pub vertical_dead_zone: f32,
    /// Top horizontal speed
    pub max_speed: f32,
    /// Horizontal acceleration toward the input direction
    pub acceleration: f32,
    /// Deceleration while grounded with no input
    pub ground_deceleration: f32,
    /// Deceleration while airborne with no input
    pub air_deceleration: f32,
    /// Constant downward velocity applied while grounded; keeps the
    /// character seated over slight slopes and steps instead of bouncing
    pub grounding_force: f32,
    /// Vertical velocity set when a jump executes
    pub jump_power: f32,
    /// Downward acceleration while airborne
    pub fall_acceleration: f32,
    /// Gravity multiplier while ascending after the jump input was released
    pub jump_end_early_gravity_modifier: f32,
    /// Terminal fall speed
    pub max_fall_speed: f32,
    /// Grace window after leaving ground during which a jump is still accepted
    pub coyote_time: f32,
    /// How long a jump press is remembered before landing
    pub jump_buffer: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            snap_input: true,
            horizontal_dead_zone: 0.1,
            vertical_dead_zone: 0.3,
            max_speed: 14.0,
            acceleration: 120.0,
            ground_deceleration: 60.0,
            air_deceleration: 30.0,
            grounding_force: -1.5,
            jump_power: 36.0,
            fall_acceleration: 110.0,
            jump_end_early_gravity_modifier: 3.0,
            max_fall_speed: 40.0,
            coyote_time: 0.15,
            jump_buffer: 0.2,
        }
    }
}

impl MovementTuning {
    /// Validate the record. The resolver refuses to construct with an
    /// invalid tuning, so a bad config file fails loudly at startup rather
    /// than producing silent broken movement.
    pub fn validate(&self) -> Result<(), TuningError> {
        let rates = [
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("ground_deceleration", self.ground_deceleration),
            ("air_deceleration", self.air_deceleration),
            ("jump_power", self.jump_power),
            ("fall_acceleration", self.fall_acceleration),
            ("max_fall_speed", self.max_fall_speed),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::NonPositiveRate { name, value });
            }
        }

        let dead_zones = [
            ("horizontal_dead_zone", self.horizontal_dead_zone),
            ("vertical_dead_zone", self.vertical_dead_zone),
        ];
        for (name, value) in dead_zones {
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(TuningError::DeadZoneOutOfRange { name, value });
            }
        }

        let windows = [
            ("coyote_time", self.coyote_time),
            ("jump_buffer", self.jump_buffer),
        ];
        for (name, value) in windows {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::InvalidWindow { name, value });
            }
        }

        let modifier = self.jump_end_early_gravity_modifier;
        if !modifier.is_finite() || modifier < 1.0 {
            return Err(TuningError::WeakEarlyReleaseModifier(modifier));
        }

        if !self.grounding_force.is_finite() || self.grounding_force > 0.0 {
            return Err(TuningError::UpwardGroundingForce(self.grounding_force));
        }

        Ok(())
    }

    /// Get the deceleration rate for the current ground state
    pub fn deceleration(&self, grounded: bool) -> f32 {
        if grounded {
            self.ground_deceleration
        } else {
            self.air_deceleration
        }
    }
}
