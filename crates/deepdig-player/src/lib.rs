//! DeepDig Player - Platformer movement resolution
//!
//! Provides the movement tuning record, the input sampling layer, and the
//! fixed-step movement state resolver. The resolver owns its state
//! exclusively and talks to the outside world through plain values: contact
//! probe results come in, a velocity and a per-tick event outbox go out.

pub mod input;
pub mod movement;
pub mod resolver;

pub use input::{InputSampler, TickInput};
pub use movement::{MovementTuning, TuningError};
pub use resolver::{Contacts, GroundedChange, MovementResolver, TickEvents};
