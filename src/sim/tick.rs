//! Session state machine
//!
//! Commands (start, restart, click) and the per-frame step that advance a
//! [`Session`]. One step processes its click first, then the timer, so a
//! click on the last frame can still clear a level before time runs out.

use glam::Vec2;

use super::hit::{self, HitKind};
use super::state::{GameEvent, GameOverReason, Session, SessionState};
use super::targets::TargetRef;
use super::timer::sanitize_dt;
use crate::audio::SoundEffect;
use crate::platform::{Frontend, IndicatorKind, SurfaceId};

/// Input gathered for a single step
///
/// Holds at most one click per frame; a driver that receives several presses
/// between steps keeps only the latest.
#[derive(Debug, Clone, Default)]
pub struct StepInput {
    /// Pointer pressed this frame (screen position)
    pub pointer_down: Option<Vec2>,
    /// Start button pressed
    pub start: bool,
    /// Restart button pressed
    pub restart: bool,
}

/// Advance the session by one frame: buttons, then the click, then time
pub fn step<F: Frontend + ?Sized>(session: &mut Session, input: &StepInput, dt: f32, fx: &mut F) {
    if input.start {
        session.start_game(fx);
    }
    if input.restart {
        session.restart_game(fx);
    }
    if let Some(pos) = input.pointer_down {
        session.on_pointer_down(pos, fx);
    }
    session.on_step(dt, fx);
}

impl Session {
    /// Leave Idle and begin level 0. Ignored in any other state.
    pub fn start_game<F: Frontend + ?Sized>(&mut self, fx: &mut F) -> bool {
        if self.state != SessionState::Idle {
            log::warn!("StartGame ignored in {:?}", self.state);
            return false;
        }
        fx.hide(SurfaceId::Start);
        self.current_level = 0;
        self.enter_playing(0, fx);
        true
    }

    /// Full reset back to level 0. Valid only from GameOver or Win.
    pub fn restart_game<F: Frontend + ?Sized>(&mut self, fx: &mut F) -> bool {
        if !self.state.is_terminal() {
            log::warn!("RestartGame ignored in {:?}", self.state);
            return false;
        }
        fx.hide(SurfaceId::GameOver);
        fx.hide(SurfaceId::Win);
        self.current_level = 0;
        self.clear_indicators(fx);
        self.release_effects(fx);
        self.registry.reset_all(fx);
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted");

        self.enter_playing(0, fx);
        true
    }

    /// Route a click through hit testing and apply its outcome.
    ///
    /// Clicks outside Playing are dropped without a tap cue.
    pub fn on_pointer_down<F: Frontend + ?Sized>(&mut self, screen_pos: Vec2, fx: &mut F) -> HitKind {
        if !self.can_interact() {
            log::debug!("click at {screen_pos} ignored in {:?}", self.state);
            return HitKind::None;
        }

        let region = fx.hit_test(screen_pos);
        let kind = hit::dispatch(region, &self.registry, fx);
        match kind {
            HitKind::Miss => self.wrong_touch(fx),
            HitKind::TargetHit(target) => self.target_hit(target, fx),
            HitKind::None => {}
        }
        kind
    }

    /// Advance shakes, the level timer and the LevelComplete hold by `dt`.
    ///
    /// The hold starts counting on the step after the one that entered
    /// LevelComplete, so the completing frame's `dt` is never part of it.
    pub fn on_step<F: Frontend + ?Sized>(&mut self, dt: f32, fx: &mut F) {
        let dt = sanitize_dt(dt);
        self.effects.update(dt, fx);

        match self.state {
            SessionState::Playing => {
                let tick = self.timer.tick(dt);
                fx.set_timer_text(&crate::format_mm_ss(tick.remaining));
                if tick.expired {
                    self.enter_game_over(GameOverReason::OutOfTime, fx);
                }
            }
            SessionState::LevelComplete => match self.complete_elapsed {
                None => self.complete_elapsed = Some(0.0),
                Some(elapsed) => {
                    let elapsed = elapsed + dt;
                    self.complete_elapsed = Some(elapsed);
                    if elapsed >= self.settings.level_complete_delay {
                        self.advance_level(fx);
                    }
                }
            },
            SessionState::Idle | SessionState::GameOver | SessionState::Win => {}
        }
    }

    fn target_hit<F: Frontend + ?Sized>(&mut self, target: TargetRef, fx: &mut F) {
        self.tries_left -= 1;
        fx.play(SoundEffect::Correct);

        if let Some(position) = self.registry.get(target).map(|t| t.position) {
            if let Some(handle) = self.effects.spawn_hit_effect(fx, position) {
                self.effect_handles.push(handle);
            }
        }

        self.mark_indicator(IndicatorKind::Correct, fx);

        if !self.registry.resolve(target, fx) {
            return;
        }
        self.resolved_count = (self.resolved_count + 1).min(self.target_count());
        self.events.push(GameEvent::TargetFound {
            target,
            tries_left: self.tries_left,
        });

        // Completion wins over running out of tries on the same click
        if self.resolved_count >= self.target_count() {
            self.enter_level_complete(fx);
        } else if self.tries_left <= 0 {
            self.enter_game_over(GameOverReason::OutOfTries, fx);
        }
    }

    fn wrong_touch<F: Frontend + ?Sized>(&mut self, fx: &mut F) {
        self.tries_left -= 1;
        fx.play(SoundEffect::Wrong);
        self.mark_indicator(IndicatorKind::Incorrect, fx);
        self.events.push(GameEvent::Missed {
            tries_left: self.tries_left,
        });

        if self.tries_left <= 0 {
            self.enter_game_over(GameOverReason::OutOfTries, fx);
        }
    }

    /// Light the indicator at the post-decrement tries index, if it exists
    fn mark_indicator<F: Frontend + ?Sized>(&self, kind: IndicatorKind, fx: &mut F) {
        let Ok(index) = usize::try_from(self.tries_left) else {
            return;
        };
        if index < fx.indicator_count(kind) {
            fx.set_indicator(kind, index, true);
        }
    }

    fn clear_indicators<F: Frontend + ?Sized>(&self, fx: &mut F) {
        for kind in [IndicatorKind::Correct, IndicatorKind::Incorrect] {
            for i in 0..fx.indicator_count(kind) {
                fx.set_indicator(kind, i, false);
            }
        }
    }

    fn release_effects<F: Frontend + ?Sized>(&mut self, fx: &mut F) {
        self.effects.release_all(fx, &mut self.effect_handles);
    }

    fn enter_playing<F: Frontend + ?Sized>(&mut self, level: usize, fx: &mut F) {
        if !self.registry.load_level(level, fx) {
            return;
        }
        self.current_level = level;
        self.tries_left = self.settings.tries_per_level;
        self.resolved_count = 0;
        self.complete_elapsed = None;
        self.release_effects(fx);
        self.timer.reset(self.settings.time_per_level);
        self.timer.start();
        self.state = SessionState::Playing;

        fx.set_timer_text(&self.timer.display());
        self.events.push(GameEvent::LevelStarted { level });
    }

    fn enter_level_complete<F: Frontend + ?Sized>(&mut self, fx: &mut F) {
        self.state = SessionState::LevelComplete;
        self.timer.stop();
        self.complete_elapsed = None;
        fx.play(SoundEffect::Win);
        self.clear_indicators(fx);
        self.release_effects(fx);
        fx.set_timer_text(&crate::format_mm_ss(self.settings.time_per_level));

        self.events.push(GameEvent::LevelCompleted {
            level: self.current_level,
        });
        log::info!("Level {} complete", self.current_level);
    }

    fn advance_level<F: Frontend + ?Sized>(&mut self, fx: &mut F) {
        let next = self.current_level + 1;
        if next < self.registry.level_count() {
            self.enter_playing(next, fx);
        } else {
            self.enter_win(fx);
        }
    }

    fn enter_game_over<F: Frontend + ?Sized>(&mut self, reason: GameOverReason, fx: &mut F) {
        if self.state != SessionState::Playing {
            return;
        }
        fx.play(SoundEffect::GameOver);
        self.state = SessionState::GameOver;
        self.timer.stop();
        fx.show(SurfaceId::GameOver);
        self.release_effects(fx);
        self.effects
            .shake_viewport(self.settings.game_over_shake, self.camera_anchor);

        self.events.push(GameEvent::GameOver {
            level: self.current_level,
            reason,
        });
        log::info!("Game Over! level {} ({:?})", self.current_level, reason);
    }

    /// The success cue for the final level already played on LevelComplete
    fn enter_win<F: Frontend + ?Sized>(&mut self, fx: &mut F) {
        self.state = SessionState::Win;
        self.timer.stop();
        self.release_effects(fx);
        fx.show(SurfaceId::Win);
        self.effects
            .shake_viewport(self.settings.win_shake, self.camera_anchor);

        self.events.push(GameEvent::Won);
        log::info!("Game Completed!");
    }
}
