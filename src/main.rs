//! DeepDig - Headless demo of the platformer movement core
//!
//! Loads the simulation settings, then runs the scripted scenario through
//! the fixed-step movement resolver and logs what happens.

mod scenario;
mod settings;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::settings::Settings;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    info!("Starting DeepDig movement demo...");

    let settings = Settings::load();
    let report = scenario::run(&settings)?;

    info!(
        "Scenario finished: {} jumps, {} landings, final position ({:.2}, {:.2})",
        report.jumps, report.landings, report.position.x, report.position.y
    );

    Ok(())
}
