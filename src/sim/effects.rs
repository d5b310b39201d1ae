//! Transient feedback: hit effects and camera shake
//!
//! Nothing here decides gameplay. The session asks for an effect, keeps the
//! returned handle, and hands the handles back for bulk release when the
//! level ends.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::platform::{EffectHandle, Scene};
use crate::settings::ShakeSettings;

/// A running camera disturbance.
///
/// Each step before `duration` elapses moves the camera to `anchor` plus a
/// random offset within `±magnitude` on x and y (z untouched). The first
/// step after that puts the camera back on `anchor` and finishes.
#[derive(Debug, Clone)]
pub struct ShakeAnimation {
    pub anchor: Vec3,
    pub duration: f32,
    pub magnitude: f32,
    pub elapsed: f32,
}

impl ShakeAnimation {
    pub fn new(anchor: Vec3, shake: ShakeSettings) -> Self {
        Self {
            anchor,
            duration: shake.duration,
            magnitude: shake.magnitude,
            elapsed: 0.0,
        }
    }

    /// Advance one step. Returns true once the anchor has been restored.
    pub fn update<S: Scene + ?Sized>(&mut self, dt: f32, rng: &mut Pcg32, scene: &mut S) -> bool {
        if self.elapsed < self.duration {
            let x = rng.random_range(-1.0f32..=1.0) * self.magnitude;
            let y = rng.random_range(-1.0f32..=1.0) * self.magnitude;
            scene.set_camera_position(self.anchor + Vec3::new(x, y, 0.0));
            self.elapsed += dt;
            false
        } else {
            scene.set_camera_position(self.anchor);
            true
        }
    }
}

/// Spawns hit effects and runs camera shakes
#[derive(Debug, Clone)]
pub struct EffectTrigger {
    rng: Pcg32,
    shakes: Vec<ShakeAnimation>,
    shake_enabled: bool,
}

impl EffectTrigger {
    pub fn new(seed: u64, shake_enabled: bool) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            shakes: Vec::new(),
            shake_enabled,
        }
    }

    /// Spawn the per-hit effect at a world position
    pub fn spawn_hit_effect<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        position: Vec2,
    ) -> Option<EffectHandle> {
        let handle = scene.spawn_effect(position);
        if handle.is_none() {
            log::trace!("no hit effect configured, skipping spawn at {position}");
        }
        handle
    }

    /// Destroy every handle and empty the list
    pub fn release_all<S: Scene + ?Sized>(&mut self, scene: &mut S, handles: &mut Vec<EffectHandle>) {
        for handle in handles.drain(..) {
            scene.destroy_effect(handle);
        }
    }

    /// Start a shake around `anchor`. Running shakes keep going; each one
    /// restores the same anchor when it finishes.
    pub fn shake_viewport(&mut self, shake: ShakeSettings, anchor: Vec3) {
        if !self.shake_enabled {
            return;
        }
        self.shakes.push(ShakeAnimation::new(anchor, shake));
    }

    /// Advance every running shake by one step
    pub fn update<S: Scene + ?Sized>(&mut self, dt: f32, scene: &mut S) {
        let rng = &mut self.rng;
        self.shakes.retain_mut(|shake| !shake.update(dt, rng, scene));
    }

    pub fn is_shaking(&self) -> bool {
        !self.shakes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessFrontend;
    use crate::sim::level::LevelSet;

    const ANCHOR: Vec3 = Vec3::new(0.0, 0.0, -10.0);

    fn frontend() -> HeadlessFrontend {
        let mut fx = HeadlessFrontend::new(LevelSet::reference());
        fx.set_camera_position(ANCHOR);
        fx
    }

    #[test]
    fn test_shake_stays_bounded_and_restores() {
        let mut fx = frontend();
        let mut trigger = EffectTrigger::new(42, true);
        trigger.shake_viewport(ShakeSettings::new(0.3, 0.15), ANCHOR);

        let mut steps = 0;
        while trigger.is_shaking() {
            trigger.update(1.0 / 60.0, &mut fx);
            let offset = fx.camera_position() - ANCHOR;
            assert!(offset.x.abs() <= 0.15 + 1e-6);
            assert!(offset.y.abs() <= 0.15 + 1e-6);
            assert_eq!(offset.z, 0.0);
            steps += 1;
            assert!(steps < 100, "shake never finished");
        }
        assert_eq!(fx.camera_position(), ANCHOR);
    }

    #[test]
    fn test_overlapping_shakes_converge_on_anchor() {
        let mut fx = frontend();
        let mut trigger = EffectTrigger::new(7, true);
        trigger.shake_viewport(ShakeSettings::new(0.3, 0.15), ANCHOR);
        trigger.update(0.1, &mut fx);
        trigger.shake_viewport(ShakeSettings::new(0.5, 0.2), ANCHOR);

        for _ in 0..20 {
            trigger.update(0.1, &mut fx);
        }
        assert!(!trigger.is_shaking());
        assert_eq!(fx.camera_position(), ANCHOR);
    }

    #[test]
    fn test_disabled_shake_never_moves_camera() {
        let mut fx = frontend();
        let mut trigger = EffectTrigger::new(1, false);
        trigger.shake_viewport(ShakeSettings::new(0.5, 0.2), ANCHOR);
        assert!(!trigger.is_shaking());
        trigger.update(0.1, &mut fx);
        assert_eq!(fx.camera_position(), ANCHOR);
    }

    #[test]
    fn test_same_seed_same_path() {
        let mut a = frontend();
        let mut b = frontend();
        let mut ta = EffectTrigger::new(99, true);
        let mut tb = EffectTrigger::new(99, true);
        ta.shake_viewport(ShakeSettings::new(0.2, 0.2), ANCHOR);
        tb.shake_viewport(ShakeSettings::new(0.2, 0.2), ANCHOR);
        for _ in 0..5 {
            ta.update(0.03, &mut a);
            tb.update(0.03, &mut b);
            assert_eq!(a.camera_position(), b.camera_position());
        }
    }

    #[test]
    fn test_release_all_destroys_handles() {
        let mut fx = frontend();
        let mut trigger = EffectTrigger::new(0, true);
        let mut handles: Vec<EffectHandle> = (0..3)
            .filter_map(|i| trigger.spawn_hit_effect(&mut fx, Vec2::splat(i as f32)))
            .collect();
        assert_eq!(handles.len(), 3);
        assert_eq!(fx.live_effect_count(), 3);

        trigger.release_all(&mut fx, &mut handles);
        assert!(handles.is_empty());
        assert_eq!(fx.live_effect_count(), 0);
    }
}
