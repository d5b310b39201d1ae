//! Target Hunt entry point
//!
//! Native headless demo: loads optional settings and level layout JSON files,
//! then plays the game automatically at a fixed 60 Hz step and logs what
//! happens.
//!
//! Usage: `target-hunt [settings.json] [levels.json]`

use glam::Vec2;

use target_hunt::Settings;
use target_hunt::consts::SIM_DT;
use target_hunt::game::Game;
use target_hunt::platform::headless::HeadlessFrontend;
use target_hunt::sim::{GameEvent, LevelSet, SessionState, TargetRef};

/// Frames between scripted clicks
const CLICK_INTERVAL: u32 = 20;
/// Hard stop for the demo loop (one minute of frames)
const MAX_FRAMES: u32 = 60 * 60;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Target Hunt (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = args
        .next()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    let layout = match args.next().map(LevelSet::load) {
        Some(Ok(layout)) => layout,
        Some(Err(e)) => {
            log::warn!("{e}; using reference levels");
            LevelSet::reference()
        }
        None => LevelSet::reference(),
    };

    let frontend = HeadlessFrontend::new(layout.clone());
    let mut game = match Game::new(settings, &layout, frontend) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start session: {e}");
            std::process::exit(1);
        }
    };
    game.queue_start();

    // Script: one click off the background (free), then every target in order
    let mut clicked_empty = false;
    let mut next_target = 0;
    for frame in 0..MAX_FRAMES {
        if game.session().state() == SessionState::Playing && frame % CLICK_INTERVAL == 0 {
            if !clicked_empty {
                game.queue_pointer_down(Vec2::new(layout.background.max.x + 1.0, 0.0));
                clicked_empty = true;
            } else {
                let level = game.session().current_level();
                if let Some(t) = layout.target(TargetRef::new(level, next_target)) {
                    game.queue_pointer_down(t.position);
                }
            }
        }

        for event in game.update(SIM_DT) {
            log::info!("frame {frame}: {event:?}");
            match event {
                GameEvent::LevelStarted { .. } => next_target = 0,
                GameEvent::TargetFound { .. } => next_target += 1,
                _ => {}
            }
        }

        let state = game.session().state();
        if state.is_terminal() && !game.session().is_shaking() {
            break;
        }
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final state: {e}"),
    }
}
