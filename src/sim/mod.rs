//! Step-driven simulation module
//!
//! All gameplay logic lives here. It is single-threaded and deterministic:
//! - Advanced only by explicit commands and per-frame steps
//! - Seeded RNG only (camera shake)
//! - No rendering, audio or UI dependencies; those sit behind `platform` traits

pub mod effects;
pub mod hit;
pub mod level;
pub mod state;
pub mod targets;
pub mod tick;
pub mod timer;

pub use effects::{EffectTrigger, ShakeAnimation};
pub use hit::{HitKind, classify, dispatch};
pub use level::{Bounds, LevelDef, LevelSet, TargetDef};
pub use state::{GameEvent, GameOverReason, Session, SessionSnapshot, SessionState};
pub use targets::{Level, Target, TargetRef, TargetRegistry};
pub use tick::{StepInput, step};
pub use timer::{LevelTimer, TimerTick};
