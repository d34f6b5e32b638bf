//! Fixed-step movement state resolver
//!
//! Consumes one [`TickInput`] and one set of [`Contacts`] per simulation
//! step and produces the character's velocity for that step, plus an
//! edge-triggered event outbox. Resolution order within a tick is fixed:
//! contacts, then jumping, then horizontal movement, then gravity.
//!
//! The resolver mutates nothing but its own state. Collision casts,
//! position integration, rendering and audio all live with the host.

use glam::Vec2;
use tracing::debug;

use crate::input::TickInput;
use crate::movement::{MovementTuning, TuningError};

/// Horizontal input below this magnitude counts as no input.
const AXIS_EPSILON: f32 = 1e-5;

/// Contact probe results for one tick, supplied by the host's collision
/// layer (short-range casts below and above the character).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    /// Walkable geometry within probe range below the character
    pub ground: bool,
    /// Geometry within probe range above the character
    pub ceiling: bool,
}

/// A grounded-state transition observed this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundedChange {
    /// The new grounded state
    pub grounded: bool,
    /// Vertical speed at the moment of impact; zero when leaving ground
    pub impact_speed: f32,
}

/// Edge-triggered events emitted by one resolver tick.
///
/// Returned by value and polled by the consumer; there is no observer
/// registration. Each event fires at most once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickEvents {
    /// A jump executed this tick
    pub jumped: bool,
    /// The grounded state flipped this tick
    pub grounded_changed: Option<GroundedChange>,
}

/// Movement state resolver for one player character.
///
/// Owns its state exclusively. Created at spawn with zero velocity and
/// airborne; ticked exactly once per fixed simulation step.
#[derive(Debug, Clone)]
pub struct MovementResolver {
    tuning: MovementTuning,

    velocity: Vec2,
    grounded: bool,
    time: f32,
    time_left_grounded: f32,
    time_jump_pressed: f32,
    coyote_usable: bool,
    buffered_jump_usable: bool,
    ended_jump_early: bool,
}

impl MovementResolver {
    /// Create a resolver for a freshly spawned character.
    ///
    /// Fails fast on an invalid tuning record; running with silently broken
    /// movement is never an option.
    pub fn new(tuning: MovementTuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            velocity: Vec2::ZERO,
            grounded: false,
            time: 0.0,
            time_left_grounded: f32::MIN,
            time_jump_pressed: 0.0,
            coyote_usable: false,
            buffered_jump_usable: false,
            ended_jump_early: false,
        })
    }

    /// The velocity to apply for the current tick.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Whether the character is standing on walkable geometry.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// The tuning this resolver was built with.
    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// Resolve one fixed simulation step.
    ///
    /// `input` must come from a sampler with latched press edges so no
    /// press is lost between ticks, `contacts` from the host's collision
    /// probe, and `dt` is the fixed step duration in seconds.
    pub fn tick(&mut self, input: TickInput, contacts: Contacts, dt: f32) -> TickEvents {
        self.time += dt;

        if input.jump_pressed {
            self.buffered_jump_usable = true;
            self.time_jump_pressed = self.time;
        }

        let mut events = TickEvents::default();
        self.handle_contacts(contacts, &mut events);
        self.handle_jump(&input, &mut events);
        self.handle_horizontal(input.move_axis.x, dt);
        self.handle_gravity(dt);
        events
    }

    fn handle_contacts(&mut self, contacts: Contacts, events: &mut TickEvents) {
        // A ceiling hit kills any remaining upward velocity
        if contacts.ceiling {
            self.velocity.y = self.velocity.y.min(0.0);
        }

        if !self.grounded && contacts.ground {
            self.grounded = true;
            self.coyote_usable = true;
            self.buffered_jump_usable = true;
            self.ended_jump_early = false;
            let impact_speed = self.velocity.y.abs();
            debug!("landed at t={:.3} (impact {:.1})", self.time, impact_speed);
            events.grounded_changed = Some(GroundedChange {
                grounded: true,
                impact_speed,
            });
        } else if self.grounded && !contacts.ground {
            self.grounded = false;
            self.time_left_grounded = self.time;
            debug!("left ground at t={:.3}", self.time);
            events.grounded_changed = Some(GroundedChange {
                grounded: false,
                impact_speed: 0.0,
            });
        }
    }

    fn has_buffered_jump(&self) -> bool {
        self.buffered_jump_usable
            && self.time < self.time_jump_pressed + self.tuning.jump_buffer
            && self.time_jump_pressed > 0.0
    }

    fn can_use_coyote(&self) -> bool {
        self.coyote_usable
            && !self.grounded
            && self.time < self.time_left_grounded + self.tuning.coyote_time
    }

    fn handle_jump(&mut self, input: &TickInput, events: &mut TickEvents) {
        if !self.ended_jump_early && !self.grounded && !input.jump_held && self.velocity.y > 0.0 {
            self.ended_jump_early = true;
        }

        if !self.has_buffered_jump() {
            return;
        }

        if self.grounded || self.can_use_coyote() {
            self.execute_jump(events);
        }

        // A buffered attempt gets exactly one resolution, fired or not;
        // landing re-arms the latch
        self.buffered_jump_usable = false;
    }

    fn execute_jump(&mut self, events: &mut TickEvents) {
        self.ended_jump_early = false;
        self.time_jump_pressed = 0.0;
        self.buffered_jump_usable = false;
        self.coyote_usable = false;
        self.velocity.y = self.tuning.jump_power;
        debug!("jump executed at t={:.3}", self.time);
        events.jumped = true;
    }

    fn handle_horizontal(&mut self, axis_x: f32, dt: f32) {
        if axis_x.abs() < AXIS_EPSILON {
            let decel = self.tuning.deceleration(self.grounded);
            self.velocity.x = move_towards(self.velocity.x, 0.0, decel * dt);
        } else {
            let target = axis_x * self.tuning.max_speed;
            self.velocity.x = move_towards(self.velocity.x, target, self.tuning.acceleration * dt);
        }
    }

    fn handle_gravity(&mut self, dt: f32) {
        if self.grounded && self.velocity.y <= 0.0 {
            self.velocity.y = self.tuning.grounding_force;
        } else {
            let mut gravity = self.tuning.fall_acceleration;
            if self.ended_jump_early && self.velocity.y > 0.0 {
                gravity *= self.tuning.jump_end_early_gravity_modifier;
            }
            self.velocity.y =
                move_towards(self.velocity.y, -self.tuning.max_fall_speed, gravity * dt);
        }
    }
}

/// Move a value towards a target by at most `max_delta`, never overshooting
fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}
