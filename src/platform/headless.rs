//! Headless frontend
//!
//! Implements every collaborator trait in memory: screen space equals world
//! space, targets are hit-tested against the level layout, and every command
//! is appended to a call log. Used by the native demo driver and by tests.

use std::collections::{BTreeSet, HashSet};

use glam::{Vec2, Vec3};

use super::{EffectHandle, IndicatorKind, Presentation, RegionTag, Scene, SurfaceId};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::INDICATOR_COUNT;
use crate::sim::level::LevelSet;
use crate::sim::targets::TargetRef;

/// Default camera rest position
const CAMERA_HOME: Vec3 = Vec3::new(0.0, 0.0, -10.0);

/// One command received by the frontend
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendCall {
    Show(SurfaceId),
    Hide(SurfaceId),
    TimerText(String),
    Indicator {
        kind: IndicatorKind,
        index: usize,
        visible: bool,
    },
    Play(SoundEffect),
    LevelActive { level: usize, active: bool },
    TargetEnabled { target: TargetRef, enabled: bool },
    SpawnEffect { handle: EffectHandle, position: Vec2 },
    DestroyEffect(EffectHandle),
    Camera(Vec3),
}

/// In-memory frontend that records what the session asked for
#[derive(Debug, Clone)]
pub struct HeadlessFrontend {
    layout: LevelSet,
    active_levels: HashSet<usize>,
    disabled_targets: HashSet<TargetRef>,
    visible_surfaces: HashSet<SurfaceId>,
    timer_text: String,
    correct: Vec<bool>,
    incorrect: Vec<bool>,
    live_effects: BTreeSet<EffectHandle>,
    next_effect: u64,
    effects_available: bool,
    camera: Vec3,
    calls: Vec<FrontendCall>,
}

impl HeadlessFrontend {
    pub fn new(layout: LevelSet) -> Self {
        Self::with_indicators(layout, INDICATOR_COUNT)
    }

    /// Frontend with `count` indicators in each row
    pub fn with_indicators(layout: LevelSet, count: usize) -> Self {
        Self {
            layout,
            active_levels: HashSet::new(),
            disabled_targets: HashSet::new(),
            visible_surfaces: HashSet::new(),
            timer_text: String::new(),
            correct: vec![false; count],
            incorrect: vec![false; count],
            live_effects: BTreeSet::new(),
            next_effect: 1,
            effects_available: true,
            camera: CAMERA_HOME,
            calls: Vec::new(),
        }
    }

    pub fn layout(&self) -> &LevelSet {
        &self.layout
    }

    /// Simulate a missing hit-effect prefab
    pub fn set_effects_available(&mut self, available: bool) {
        self.effects_available = available;
    }

    pub fn is_visible(&self, surface: SurfaceId) -> bool {
        self.visible_surfaces.contains(&surface)
    }

    pub fn is_level_active(&self, level: usize) -> bool {
        self.active_levels.contains(&level)
    }

    pub fn is_target_enabled(&self, target: TargetRef) -> bool {
        !self.disabled_targets.contains(&target)
    }

    pub fn timer_text(&self) -> &str {
        &self.timer_text
    }

    pub fn indicator(&self, kind: IndicatorKind, index: usize) -> bool {
        self.row(kind).get(index).copied().unwrap_or(false)
    }

    pub fn live_effect_count(&self) -> usize {
        self.live_effects.len()
    }

    pub fn calls(&self) -> &[FrontendCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Sound effects played since the last `clear_calls`, in order
    pub fn sounds_played(&self) -> Vec<SoundEffect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                FrontendCall::Play(effect) => Some(*effect),
                _ => None,
            })
            .collect()
    }

    pub fn count_sound(&self, effect: SoundEffect) -> usize {
        self.sounds_played().iter().filter(|e| **e == effect).count()
    }

    /// Indicator writes since the last `clear_calls`
    pub fn indicator_writes(&self) -> Vec<&FrontendCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, FrontendCall::Indicator { .. }))
            .collect()
    }

    fn row(&self, kind: IndicatorKind) -> &[bool] {
        match kind {
            IndicatorKind::Correct => &self.correct,
            IndicatorKind::Incorrect => &self.incorrect,
        }
    }
}

impl Presentation for HeadlessFrontend {
    fn show(&mut self, surface: SurfaceId) {
        self.visible_surfaces.insert(surface);
        self.calls.push(FrontendCall::Show(surface));
    }

    fn hide(&mut self, surface: SurfaceId) {
        self.visible_surfaces.remove(&surface);
        self.calls.push(FrontendCall::Hide(surface));
    }

    fn set_timer_text(&mut self, text: &str) {
        self.timer_text = text.to_string();
        self.calls.push(FrontendCall::TimerText(text.to_string()));
    }

    fn set_indicator(&mut self, kind: IndicatorKind, index: usize, visible: bool) {
        let row = match kind {
            IndicatorKind::Correct => &mut self.correct,
            IndicatorKind::Incorrect => &mut self.incorrect,
        };
        if let Some(slot) = row.get_mut(index) {
            *slot = visible;
        }
        self.calls.push(FrontendCall::Indicator {
            kind,
            index,
            visible,
        });
    }

    fn indicator_count(&self, kind: IndicatorKind) -> usize {
        self.row(kind).len()
    }
}

impl Scene for HeadlessFrontend {
    fn set_level_active(&mut self, level: usize, active: bool) {
        if active {
            self.active_levels.insert(level);
        } else {
            self.active_levels.remove(&level);
        }
        self.calls.push(FrontendCall::LevelActive { level, active });
    }

    fn set_target_enabled(&mut self, target: TargetRef, enabled: bool) {
        if enabled {
            self.disabled_targets.remove(&target);
        } else {
            self.disabled_targets.insert(target);
        }
        self.calls.push(FrontendCall::TargetEnabled { target, enabled });
    }

    fn spawn_effect(&mut self, position: Vec2) -> Option<EffectHandle> {
        if !self.effects_available {
            return None;
        }
        let handle = EffectHandle(self.next_effect);
        self.next_effect += 1;
        self.live_effects.insert(handle);
        self.calls.push(FrontendCall::SpawnEffect { handle, position });
        Some(handle)
    }

    fn destroy_effect(&mut self, handle: EffectHandle) {
        if self.live_effects.remove(&handle) {
            self.calls.push(FrontendCall::DestroyEffect(handle));
        }
    }

    fn camera_position(&self) -> Vec3 {
        self.camera
    }

    fn set_camera_position(&mut self, position: Vec3) {
        self.camera = position;
        self.calls.push(FrontendCall::Camera(position));
    }

    /// Enabled targets of active levels first, then the background
    fn hit_test(&self, screen_pos: Vec2) -> Option<RegionTag> {
        let mut active: Vec<usize> = self.active_levels.iter().copied().collect();
        active.sort_unstable();

        for level in active {
            let Some(def) = self.layout.levels.get(level) else {
                continue;
            };
            for (index, target) in def.targets.iter().enumerate() {
                let id = TargetRef::new(level, index);
                if self.is_target_enabled(id) && target.contains(screen_pos) {
                    return Some(RegionTag::Target(id));
                }
            }
        }

        self.layout
            .background
            .contains(screen_pos)
            .then_some(RegionTag::Background)
    }
}

impl AudioSink for HeadlessFrontend {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("play {}", effect.as_str());
        self.calls.push(FrontendCall::Play(effect));
    }
}
