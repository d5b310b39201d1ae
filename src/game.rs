//! Game instance: a session plus the frontend it drives
//!
//! The presentation layer calls the four commands here; input that arrives
//! between frames is buffered and applied in order on the next `update`.

use glam::Vec2;

use crate::platform::Frontend;
use crate::settings::{ConfigError, Settings};
use crate::sim::{GameEvent, HitKind, LevelSet, Session, SessionSnapshot, StepInput, step};

/// Game instance holding all state
#[derive(Debug)]
pub struct Game<F: Frontend> {
    session: Session,
    frontend: F,
    /// One-shot input collected since the last update
    input: StepInput,
}

impl<F: Frontend> Game<F> {
    pub fn new(
        settings: Settings,
        layout: &LevelSet,
        mut frontend: F,
    ) -> Result<Self, ConfigError> {
        let session = Session::new(settings, layout, &mut frontend)?;
        Ok(Self {
            session,
            frontend,
            input: StepInput::default(),
        })
    }

    pub fn start_game(&mut self) -> bool {
        self.session.start_game(&mut self.frontend)
    }

    pub fn restart_game(&mut self) -> bool {
        self.session.restart_game(&mut self.frontend)
    }

    /// Handle a click immediately
    pub fn on_pointer_down(&mut self, screen_pos: Vec2) -> HitKind {
        self.session.on_pointer_down(screen_pos, &mut self.frontend)
    }

    pub fn on_step(&mut self, dt: f32) {
        self.session.on_step(dt, &mut self.frontend);
    }

    /// Buffer a click for the next `update` (a later click replaces it)
    pub fn queue_pointer_down(&mut self, screen_pos: Vec2) {
        if let Some(dropped) = self.input.pointer_down.replace(screen_pos) {
            log::debug!("click at {dropped} replaced by {screen_pos} before update");
        }
    }

    pub fn queue_start(&mut self) {
        self.input.start = true;
    }

    pub fn queue_restart(&mut self) {
        self.input.restart = true;
    }

    /// Run one frame with the buffered input, then clear it
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let input = std::mem::take(&mut self.input);
        step(&mut self.session, &input, dt, &mut self.frontend);
        self.session.drain_events()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::platform::SurfaceId;
    use crate::platform::headless::HeadlessFrontend;
    use crate::sim::{SessionState, TargetRef};

    fn game() -> Game<HeadlessFrontend> {
        let layout = LevelSet::reference();
        Game::new(Settings::default(), &layout, HeadlessFrontend::new(layout.clone())).unwrap()
    }

    #[test]
    fn test_buffered_input_applies_once() {
        let mut game = game();
        game.queue_start();
        let events = game.update(SIM_DT);
        assert_eq!(events, vec![GameEvent::LevelStarted { level: 0 }]);
        assert_eq!(game.session().state(), SessionState::Playing);
        assert!(!game.frontend().is_visible(SurfaceId::Start));

        let pos = game
            .frontend()
            .layout()
            .target(TargetRef::new(0, 0))
            .map(|t| t.position)
            .unwrap();
        game.queue_pointer_down(pos);
        let events = game.update(SIM_DT);
        assert!(matches!(events[0], GameEvent::TargetFound { .. }));
        assert_eq!(game.session().tries_left(), 4);

        // Nothing queued: no further clicks processed
        game.update(SIM_DT);
        assert_eq!(game.session().tries_left(), 4);
    }

    #[test]
    fn test_second_queued_click_replaces_first() {
        let mut game = game();
        game.start_game();
        let target = game
            .frontend()
            .layout()
            .target(TargetRef::new(0, 2))
            .map(|t| t.position)
            .unwrap();

        // Background first, then the target: only the target click lands
        game.queue_pointer_down(Vec2::new(0.0, -4.2));
        game.queue_pointer_down(target);
        let events = game.update(SIM_DT);
        assert_eq!(
            events,
            vec![GameEvent::TargetFound {
                target: TargetRef::new(0, 2),
                tries_left: 4,
            }]
        );
        assert_eq!(game.session().resolved_count(), 1);
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let layout = LevelSet::reference();
        let settings = Settings {
            tries_per_level: 0,
            ..Default::default()
        };
        let result = Game::new(settings, &layout, HeadlessFrontend::new(layout.clone()));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_frontend_mut_reaches_session() {
        let mut game = game();
        game.start_game();
        game.frontend_mut().set_effects_available(false);
        let pos = game
            .frontend()
            .layout()
            .target(TargetRef::new(0, 0))
            .map(|t| t.position)
            .unwrap();
        assert_eq!(
            game.on_pointer_down(pos),
            HitKind::TargetHit(TargetRef::new(0, 0))
        );
        assert!(game.session().live_effects().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut game = game();
        game.start_game();
        game.on_step(1.0);
        let snap = game.snapshot();
        assert_eq!(snap.state, SessionState::Playing);
        assert_eq!(snap.time_left, 9.0);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"Playing\""));
    }

    #[test]
    fn test_restart_via_queue() {
        let mut game = game();
        game.start_game();
        game.on_step(10.0);
        assert_eq!(game.session().state(), SessionState::GameOver);
        game.queue_restart();
        let events = game.update(SIM_DT);
        assert_eq!(events[0], GameEvent::Restarted);
        assert_eq!(game.session().state(), SessionState::Playing);
    }
}
