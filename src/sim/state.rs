//! Session state and core simulation types
//!
//! Everything that changes while a run is in progress lives in [`Session`].
//! The transition rules that mutate it are in `tick.rs`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::effects::EffectTrigger;
use super::level::LevelSet;
use super::targets::{TargetRef, TargetRegistry};
use super::timer::LevelTimer;
use crate::platform::{EffectHandle, Frontend, SurfaceId};
use crate::settings::{ConfigError, Settings};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Start panel up, waiting for StartGame
    Idle,
    /// Active level: clicks count, timer runs
    Playing,
    /// Every target of the level found; next level (or Win) follows
    LevelComplete,
    /// Out of tries or time
    GameOver,
    /// Final level cleared
    Win,
}

impl SessionState {
    /// Clicks are accepted only while playing
    pub fn can_interact(&self) -> bool {
        matches!(self, SessionState::Playing)
    }

    /// The level timer counts down only while playing
    pub fn timer_running(&self) -> bool {
        matches!(self, SessionState::Playing)
    }

    /// States left only through RestartGame
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::GameOver | SessionState::Win)
    }
}

/// Why a run ended in GameOver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    OutOfTries,
    OutOfTime,
}

/// Things that happened during a command or step, oldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: usize },
    TargetFound { target: TargetRef, tries_left: i32 },
    Missed { tries_left: i32 },
    LevelCompleted { level: usize },
    GameOver { level: usize, reason: GameOverReason },
    Won,
    Restarted,
}

/// Serializable summary of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub current_level: usize,
    pub level_count: usize,
    pub tries_left: i32,
    pub time_left: f32,
    pub resolved_count: usize,
    pub target_count: usize,
    pub live_effects: usize,
}

/// The mutable run-time record of progress through the level sequence
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) settings: Settings,
    pub(crate) registry: TargetRegistry,
    pub(crate) timer: LevelTimer,
    pub(crate) effects: EffectTrigger,
    /// Transient effects spawned during the current level
    pub(crate) effect_handles: Vec<EffectHandle>,
    pub(crate) current_level: usize,
    /// May dip below zero on the click that ends the level
    pub(crate) tries_left: i32,
    pub(crate) resolved_count: usize,
    pub(crate) state: SessionState,
    /// Camera rest position, captured at creation
    pub(crate) camera_anchor: Vec3,
    /// Time spent in LevelComplete; `None` during the step that entered it
    pub(crate) complete_elapsed: Option<f32>,
    pub(crate) events: Vec<GameEvent>,
}

impl Session {
    /// Create a session in Idle: start panel shown, interaction off, timer
    /// text at the full budget.
    ///
    /// Fails without touching the frontend if the settings or the layout are
    /// unplayable (empty level, non-finite budget or delay, bad radius).
    pub fn new<F: Frontend + ?Sized>(
        settings: Settings,
        layout: &LevelSet,
        fx: &mut F,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        layout.validate()?;

        let session = Self {
            registry: TargetRegistry::new(layout),
            timer: LevelTimer::new(settings.time_per_level),
            effects: EffectTrigger::new(settings.shake_seed, settings.effective_screen_shake()),
            effect_handles: Vec::new(),
            current_level: 0,
            tries_left: settings.tries_per_level,
            resolved_count: 0,
            state: SessionState::Idle,
            camera_anchor: fx.camera_position(),
            complete_elapsed: None,
            events: Vec::new(),
            settings,
        };

        fx.show(SurfaceId::Start);
        fx.set_timer_text(&session.timer.display());
        log::info!(
            "Session ready: {} levels, {} tries / {}s per level",
            session.registry.level_count(),
            session.settings.tries_per_level,
            session.settings.time_per_level
        );
        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn can_interact(&self) -> bool {
        self.state.can_interact()
    }

    pub fn timer_running(&self) -> bool {
        self.state.timer_running() && self.timer.is_running()
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn level_count(&self) -> usize {
        self.registry.level_count()
    }

    pub fn tries_left(&self) -> i32 {
        self.tries_left
    }

    /// Remaining level time, clamped at zero
    pub fn time_left(&self) -> f32 {
        self.timer.remaining()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved_count
    }

    /// N for the current level
    pub fn target_count(&self) -> usize {
        self.registry.target_count(self.current_level)
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Handles of transient effects still alive this level
    pub fn live_effects(&self) -> &[EffectHandle] {
        &self.effect_handles
    }

    pub fn is_shaking(&self) -> bool {
        self.effects.is_shaking()
    }

    pub fn camera_anchor(&self) -> Vec3 {
        self.camera_anchor
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            current_level: self.current_level,
            level_count: self.level_count(),
            tries_left: self.tries_left,
            time_left: self.time_left(),
            resolved_count: self.resolved_count,
            target_count: self.target_count(),
            live_effects: self.effect_handles.len(),
        }
    }
}
