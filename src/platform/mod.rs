//! Platform abstraction layer
//!
//! The simulation never touches a renderer, UI toolkit or audio device
//! directly. It drives them through these traits:
//! - [`Presentation`]: panels, timer text, feedback indicators
//! - [`Scene`]: target visibility, transient effects, camera, hit testing
//! - [`AudioSink`]: one-shot sound effects
//!
//! [`headless::HeadlessFrontend`] implements all three without any output
//! device and records every command it receives.

pub mod headless;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub use crate::audio::AudioSink;
use crate::sim::TargetRef;

/// On-screen panels the session can show or hide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceId {
    Start,
    GameOver,
    Win,
    /// Exists in the layout but nothing transitions to it
    Pause,
}

/// Row of HUD feedback indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    Correct,
    Incorrect,
}

/// Opaque handle to a spawned transient effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectHandle(pub u64);

/// Tag of the region found under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionTag {
    /// The level background
    Background,
    /// A target's clickable region
    Target(TargetRef),
}

/// Panels, timer label and indicator rows
pub trait Presentation {
    fn show(&mut self, surface: SurfaceId);
    fn hide(&mut self, surface: SurfaceId);
    fn set_timer_text(&mut self, text: &str);
    fn set_indicator(&mut self, kind: IndicatorKind, index: usize, visible: bool);
    /// Number of indicators available for `kind` (0 if the row is absent)
    fn indicator_count(&self, kind: IndicatorKind) -> usize;
}

/// World-side collaborator: target visuals, effects, camera, hit testing
pub trait Scene {
    /// Show or hide a whole level's group of targets
    fn set_level_active(&mut self, level: usize, active: bool);
    /// Enable or disable a target's visual and clickable region together
    fn set_target_enabled(&mut self, target: TargetRef, enabled: bool);
    /// Spawn a transient effect; `None` when no effect is configured
    fn spawn_effect(&mut self, position: Vec2) -> Option<EffectHandle>;
    /// Destroy a transient effect; unknown handles are ignored
    fn destroy_effect(&mut self, handle: EffectHandle);
    fn camera_position(&self) -> Vec3;
    fn set_camera_position(&mut self, position: Vec3);
    /// Region under a screen position, if any
    fn hit_test(&self, screen_pos: Vec2) -> Option<RegionTag>;
}

/// Everything the session drives
pub trait Frontend: Presentation + Scene + AudioSink {}

impl<T: Presentation + Scene + AudioSink> Frontend for T {}
