//! Scripted headless scenario
//!
//! Drives the movement resolver through a fixed input script against an
//! analytic ground/ceiling probe, integrating position from the returned
//! velocity. This is how the tuning gets exercised end to end without a
//! renderer: run it and read the event log.

use anyhow::Context;
use glam::Vec2;
use tracing::info;

use deepdig_core::{GameTime, Timer, TimerSet};
use deepdig_player::{Contacts, InputSampler, MovementResolver};

use crate::settings::{ScenarioSettings, Settings};

/// Host frame cadence feeding the sampler and the time system
const FRAME_DT: f32 = 1.0 / 60.0;

/// Summary of a finished scenario run
#[derive(Debug, Clone, Copy)]
pub struct ScenarioReport {
    pub jumps: u32,
    pub landings: u32,
    pub position: Vec2,
}

/// Control intent at one point of the script
struct ScriptSample {
    move_axis: Vec2,
    jump_held: bool,
}

/// The input script: run right, full jump, short hop, then a jump left
/// with a second press buffered just before landing.
fn script(t: f32) -> ScriptSample {
    if t < 1.0 {
        ScriptSample {
            move_axis: Vec2::X,
            jump_held: false,
        }
    } else if t < 1.35 {
        ScriptSample {
            move_axis: Vec2::X,
            jump_held: true,
        }
    } else if t < 2.3 {
        ScriptSample {
            move_axis: Vec2::X,
            jump_held: false,
        }
    } else if t < 2.36 {
        ScriptSample {
            move_axis: Vec2::ZERO,
            jump_held: true,
        }
    } else if t < 3.5 {
        ScriptSample {
            move_axis: Vec2::ZERO,
            jump_held: false,
        }
    } else if t < 3.9 {
        ScriptSample {
            move_axis: Vec2::NEG_X,
            jump_held: true,
        }
    } else if t < 4.05 {
        ScriptSample {
            move_axis: Vec2::NEG_X,
            jump_held: false,
        }
    } else if t < 4.11 {
        ScriptSample {
            move_axis: Vec2::NEG_X,
            jump_held: true,
        }
    } else {
        ScriptSample {
            move_axis: Vec2::ZERO,
            jump_held: false,
        }
    }
}

/// Short-range casts below and above the character against the flat world
fn probe(position: Vec2, scenario: &ScenarioSettings) -> Contacts {
    let ground = position.y - scenario.ground_height <= scenario.probe_distance;
    let ceiling = scenario
        .ceiling_height
        .map(|height| height - position.y <= scenario.probe_distance)
        .unwrap_or(false);
    Contacts { ground, ceiling }
}

/// Run the scripted scenario to completion
pub fn run(settings: &Settings) -> anyhow::Result<ScenarioReport> {
    let mut resolver =
        MovementResolver::new(settings.movement.clone()).context("invalid movement tuning")?;
    let mut sampler = InputSampler::new();
    let mut game_time = GameTime::new(settings.time.clone());

    let mut timers = TimerSet::new();
    let status = timers.register(
        Timer::looping(settings.scenario.status_interval).context("invalid status interval")?,
    );

    let mut position = Vec2::new(0.0, 2.0);
    let mut prev_held = false;
    let mut jumps = 0;
    let mut landings = 0;

    info!(
        "Running scenario for {:.1}s at {:.0}Hz fixed steps",
        settings.scenario.duration,
        1.0 / game_time.fixed_dt()
    );

    while game_time.total_time < settings.scenario.duration as f64 {
        game_time.update(FRAME_DT);
        let t = game_time.total_time as f32;

        // Feed the sampler at frame cadence; press/release edges are
        // derived from the script's held level
        let sample = script(t);
        sampler.set_move_axis(sample.move_axis);
        if sample.jump_held && !prev_held {
            sampler.press_jump();
        } else if !sample.jump_held && prev_held {
            sampler.release_jump();
        }
        prev_held = sample.jump_held;

        for fired in timers.tick(game_time.delta_time, game_time.unscaled_delta_time) {
            if fired == status {
                let velocity = resolver.velocity();
                info!(
                    "t={:.2}s position ({:.2}, {:.2}) velocity ({:.1}, {:.1})",
                    t, position.x, position.y, velocity.x, velocity.y
                );
            }
        }

        for _ in 0..game_time.fixed_steps() {
            let dt = game_time.fixed_dt();
            let contacts = probe(position, &settings.scenario);
            let input = sampler.sample(&settings.movement);
            let events = resolver.tick(input, contacts, dt);

            if events.jumped {
                jumps += 1;
                info!("t={:.2}s jumped (vy {:.1})", t, resolver.velocity().y);
            }
            if let Some(change) = events.grounded_changed {
                if change.grounded {
                    landings += 1;
                    info!("t={:.2}s landed (impact {:.1})", t, change.impact_speed);
                } else {
                    info!("t={:.2}s left ground", t);
                }
            }

            position += resolver.velocity() * dt;
            if position.y < settings.scenario.ground_height {
                position.y = settings.scenario.ground_height;
            }
        }
    }

    Ok(ScenarioReport {
        jumps,
        landings,
        position,
    })
}
