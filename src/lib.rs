//! Target Hunt - A find-the-hidden-targets level game
//!
//! Core modules:
//! - `sim`: Step-driven simulation (timer, targets, hit dispatch, session state machine)
//! - `platform`: Collaborator traits for presentation/scene plus a headless frontend
//! - `audio`: Sound cues requested by the simulation
//! - `settings`: Tunable budgets and effect preferences
//! - `game`: Frontend + session bundle with a per-frame step entry point

pub mod audio;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{ConfigError, Settings, ShakeSettings};

/// Game configuration constants
pub mod consts {
    /// Fixed step used by the native driver (60 Hz, one step per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Tries granted on every level entry
    pub const TRIES_PER_LEVEL: i32 = 5;
    /// Seconds granted on every level entry
    pub const TIME_PER_LEVEL: f32 = 10.0;

    /// Camera disturbance when the run is lost
    pub const GAME_OVER_SHAKE_DURATION: f32 = 0.3;
    pub const GAME_OVER_SHAKE_MAGNITUDE: f32 = 0.15;
    /// Camera disturbance when the final level is cleared
    pub const WIN_SHAKE_DURATION: f32 = 0.5;
    pub const WIN_SHAKE_MAGNITUDE: f32 = 0.2;

    /// Feedback indicators per kind shown by the reference HUD
    pub const INDICATOR_COUNT: usize = 5;
}

/// Format seconds as a zero-padded `mm:ss` string.
///
/// Both fields are floor-truncated and negative input is clamped to zero.
pub fn format_mm_ss(seconds: f32) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let minutes = (seconds / 60.0).floor() as u32;
    let secs = (seconds % 60.0).floor() as u32;
    format!("{:02}:{:02}", minutes, secs)
}
