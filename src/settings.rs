//! Runtime settings
//!
//! Loaded from an optional JSON file; anything missing falls back to the
//! gameplay constants.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscores::DEFAULT_HIGH_SCORE_FILE;
use crate::sim::SpawnRates;

/// Errors from reading a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings: {0}")]
    Io(#[from] io::Error),
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Engine and driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the high score record lives
    pub high_score_file: PathBuf,
    /// Fixed driver cadence; spawn rates are per tick at this rate
    pub tick_hz: u32,
    /// RNG seed (None = random per process)
    pub seed: Option<u64>,
    /// Obstacle spawn probability per tick at 1x speed
    pub obstacle_spawn_rate: f64,
    /// Coin spawn probability per tick
    pub coin_spawn_rate: f64,
    /// Lives at the start of every run (at least 1)
    pub starting_lives: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_file: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            tick_hz: TICK_HZ,
            seed: None,
            obstacle_spawn_rate: OBSTACLE_SPAWN_RATE,
            coin_spawn_rate: COIN_SPAWN_RATE,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Settings {
    /// Parse a settings file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Clamp values into usable ranges
    pub fn sanitized(mut self) -> Self {
        self.tick_hz = self.tick_hz.clamp(1, 1000);
        self.obstacle_spawn_rate = self.obstacle_spawn_rate.clamp(0.0, 1.0);
        self.coin_spawn_rate = self.coin_spawn_rate.clamp(0.0, 1.0);
        self.starting_lives = self.starting_lives.max(1);
        self
    }

    /// Fixed timestep for the driver
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_hz.max(1) as f32
    }

    pub fn spawn_rates(&self) -> SpawnRates {
        SpawnRates {
            obstacle: self.obstacle_spawn_rate,
            coin: self.coin_spawn_rate,
        }
    }
}
