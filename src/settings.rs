//! Simulation settings with persistence
//!
//! Settings are saved to `~/.config/deepdig/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use deepdig_core::TimeConfig;
use deepdig_player::MovementTuning;

/// All simulation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub movement: MovementTuning,
    pub time: TimeConfig,
    pub scenario: ScenarioSettings,
}

/// Settings for the headless scenario world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSettings {
    /// How long the scripted run lasts, in seconds
    pub duration: f32,
    /// Height of the flat ground plane
    pub ground_height: f32,
    /// Optional ceiling height above the ground
    pub ceiling_height: Option<f32>,
    /// Reach of the contact probes below and above the character
    pub probe_distance: f32,
    /// Interval of the periodic status log, in seconds
    pub status_interval: f32,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            duration: 6.0,
            ground_height: 0.0,
            ceiling_height: None,
            probe_distance: 0.05,
            status_interval: 1.0,
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("deepdig"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory, using default settings");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read_from(&path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to load settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    fn read_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}
