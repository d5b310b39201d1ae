//! Target registry
//!
//! Owns every level's targets and their resolved flags, and keeps the
//! scene's visuals/clickable regions in step with them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::LevelSet;
use crate::platform::Scene;

/// Stable reference to one target: (level, index within level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub level: usize,
    pub index: usize,
}

impl TargetRef {
    pub const fn new(level: usize, index: usize) -> Self {
        Self { level, index }
    }
}

/// A clickable target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetRef,
    pub position: Vec2,
    /// Clicked this level; cleared only by a level load or full reset
    pub resolved: bool,
    /// Visual and clickable region are on
    pub enabled: bool,
}

/// A level's targets plus whether the level is the one being played
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub targets: Vec<Target>,
    pub active: bool,
}

/// All levels' targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetRegistry {
    levels: Vec<Level>,
    active: Option<usize>,
}

impl TargetRegistry {
    pub fn new(layout: &LevelSet) -> Self {
        let levels = layout
            .levels
            .iter()
            .enumerate()
            .map(|(level, def)| Level {
                targets: def
                    .targets
                    .iter()
                    .enumerate()
                    .map(|(index, t)| Target {
                        id: TargetRef::new(level, index),
                        position: t.position,
                        resolved: false,
                        enabled: true,
                    })
                    .collect(),
                active: false,
            })
            .collect();
        Self {
            levels,
            active: None,
        }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// N for a level (0 if it does not exist)
    pub fn target_count(&self, level: usize) -> usize {
        self.levels.get(level).map_or(0, |l| l.targets.len())
    }

    /// Level currently loaded for play
    pub fn active_level(&self) -> Option<usize> {
        self.active
    }

    pub fn get(&self, target: TargetRef) -> Option<&Target> {
        self.levels.get(target.level)?.targets.get(target.index)
    }

    pub fn level(&self, level: usize) -> Option<&Level> {
        self.levels.get(level)
    }

    /// Activate `index`, deactivate every other level, and re-enable and
    /// unresolve all of its targets. Returns false for an unknown level.
    pub fn load_level<S: Scene + ?Sized>(&mut self, index: usize, scene: &mut S) -> bool {
        if index >= self.levels.len() {
            log::warn!("load_level({index}) ignored: only {} levels", self.levels.len());
            return false;
        }

        for (i, level) in self.levels.iter_mut().enumerate() {
            level.active = i == index;
            scene.set_level_active(i, level.active);
        }

        let level = &mut self.levels[index];
        for target in &mut level.targets {
            target.resolved = false;
            target.enabled = true;
            scene.set_target_enabled(target.id, true);
        }
        self.active = Some(index);

        log::info!("Level {} has {} targets", index, level.targets.len());
        true
    }

    /// Mark a target of the active level resolved and disable it.
    ///
    /// Returns false (and changes nothing) if the target is unknown, belongs
    /// to an inactive level, or is already resolved.
    pub fn resolve<S: Scene + ?Sized>(&mut self, target: TargetRef, scene: &mut S) -> bool {
        if self.active != Some(target.level) {
            return false;
        }
        let Some(t) = self
            .levels
            .get_mut(target.level)
            .and_then(|l| l.targets.get_mut(target.index))
        else {
            return false;
        };
        if t.resolved {
            return false;
        }

        t.resolved = true;
        t.enabled = false;
        scene.set_target_enabled(target, false);
        true
    }

    pub fn resolved_count(&self, level: usize) -> usize {
        self.levels
            .get(level)
            .map_or(0, |l| l.targets.iter().filter(|t| t.resolved).count())
    }

    /// Whether a hit on `target` should count: known, active level, unresolved
    pub fn is_hittable(&self, target: TargetRef) -> bool {
        self.active == Some(target.level) && self.get(target).is_some_and(|t| !t.resolved)
    }

    /// Re-enable every target of every level and clear all resolved flags
    pub fn reset_all<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        for level in &mut self.levels {
            for target in &mut level.targets {
                target.resolved = false;
                target.enabled = true;
                scene.set_target_enabled(target.id, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessFrontend;

    fn setup() -> (TargetRegistry, HeadlessFrontend) {
        let layout = LevelSet::reference();
        (TargetRegistry::new(&layout), HeadlessFrontend::new(layout))
    }

    #[test]
    fn test_load_level_activates_only_that_level() {
        let (mut reg, mut fx) = setup();
        assert!(reg.load_level(1, &mut fx));
        assert_eq!(reg.active_level(), Some(1));
        assert!(!reg.level(0).unwrap().active);
        assert!(reg.level(1).unwrap().active);
        assert!(fx.is_level_active(1));
        assert!(!fx.is_level_active(0));
        assert!(!fx.is_level_active(2));
    }

    #[test]
    fn test_load_unknown_level() {
        let (mut reg, mut fx) = setup();
        assert!(!reg.load_level(7, &mut fx));
        assert_eq!(reg.active_level(), None);
    }

    #[test]
    fn test_resolve_once() {
        let (mut reg, mut fx) = setup();
        reg.load_level(0, &mut fx);
        let t = TargetRef::new(0, 2);

        assert!(reg.resolve(t, &mut fx));
        assert_eq!(reg.resolved_count(0), 1);
        assert!(!fx.is_target_enabled(t));
        assert!(!reg.is_hittable(t));

        assert!(!reg.resolve(t, &mut fx));
        assert_eq!(reg.resolved_count(0), 1);
    }

    #[test]
    fn test_resolve_rejects_inactive_level() {
        let (mut reg, mut fx) = setup();
        assert!(!reg.resolve(TargetRef::new(0, 0), &mut fx));
        reg.load_level(0, &mut fx);
        assert!(!reg.resolve(TargetRef::new(1, 0), &mut fx));
        assert!(!reg.resolve(TargetRef::new(0, 99), &mut fx));
        assert_eq!(reg.resolved_count(0), 0);
    }

    #[test]
    fn test_reload_clears_level() {
        let (mut reg, mut fx) = setup();
        reg.load_level(0, &mut fx);
        reg.resolve(TargetRef::new(0, 0), &mut fx);
        reg.resolve(TargetRef::new(0, 1), &mut fx);
        reg.load_level(0, &mut fx);
        assert_eq!(reg.resolved_count(0), 0);
        assert!(fx.is_target_enabled(TargetRef::new(0, 0)));
    }

    #[test]
    fn test_reset_all() {
        let (mut reg, mut fx) = setup();
        reg.load_level(0, &mut fx);
        for i in 0..5 {
            reg.resolve(TargetRef::new(0, i), &mut fx);
        }
        reg.load_level(1, &mut fx);
        reg.resolve(TargetRef::new(1, 3), &mut fx);

        reg.reset_all(&mut fx);
        for level in 0..reg.level_count() {
            assert_eq!(reg.resolved_count(level), 0);
            for i in 0..reg.target_count(level) {
                let t = TargetRef::new(level, i);
                assert!(reg.get(t).unwrap().enabled);
                assert!(fx.is_target_enabled(t));
            }
        }
    }
}
