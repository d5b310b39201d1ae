//! Game settings and preferences
//!
//! Loaded from JSON on native builds; every field falls back to the
//! compiled-in defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading settings or level layouts
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Duration/magnitude pair for a camera disturbance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeSettings {
    /// Seconds the camera keeps moving
    pub duration: f32,
    /// Maximum offset per axis (world units)
    pub magnitude: f32,
}

impl ShakeSettings {
    pub const fn new(duration: f32, magnitude: f32) -> Self {
        Self {
            duration,
            magnitude,
        }
    }

    fn is_valid(&self) -> bool {
        self.duration.is_finite()
            && self.magnitude.is_finite()
            && self.duration >= 0.0
            && self.magnitude >= 0.0
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Budgets ===
    /// Tries granted on every level entry
    pub tries_per_level: i32,
    /// Seconds granted on every level entry
    pub time_per_level: f32,
    /// Seconds the LevelComplete state is held before the next level loads
    pub level_complete_delay: f32,

    // === Visual Effects ===
    /// Camera shake on game over / win
    pub screen_shake: bool,
    pub game_over_shake: ShakeSettings,
    pub win_shake: ShakeSettings,
    /// Seed for the shake RNG (same seed, same camera path)
    pub shake_seed: u64,

    // === Accessibility ===
    /// Reduced motion (suppresses camera shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tries_per_level: TRIES_PER_LEVEL,
            time_per_level: TIME_PER_LEVEL,
            level_complete_delay: 0.0,

            screen_shake: true,
            game_over_shake: ShakeSettings::new(
                GAME_OVER_SHAKE_DURATION,
                GAME_OVER_SHAKE_MAGNITUDE,
            ),
            win_shake: ShakeSettings::new(WIN_SHAKE_DURATION, WIN_SHAKE_MAGNITUDE),
            shake_seed: 0x5EED,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Reject budgets the state machine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tries_per_level < 1 {
            return Err(ConfigError::Invalid(format!(
                "tries_per_level must be at least 1, got {}",
                self.tries_per_level
            )));
        }
        if !self.time_per_level.is_finite() || self.time_per_level <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "time_per_level must be positive, got {}",
                self.time_per_level
            )));
        }
        if !self.level_complete_delay.is_finite() || self.level_complete_delay < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "level_complete_delay must be non-negative, got {}",
                self.level_complete_delay
            )));
        }
        if !self.game_over_shake.is_valid() || !self.win_shake.is_valid() {
            return Err(ConfigError::Invalid(
                "shake duration and magnitude must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}
