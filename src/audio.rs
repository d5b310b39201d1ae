//! Audio cues
//!
//! The simulation only names the cue to play; decoding and mixing belong to
//! whatever [`AudioSink`] the frontend provides. Playback is fire-and-forget
//! and overlapping instances of the same cue are allowed.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Any click while interaction is enabled
    Tap,
    /// Target found
    Correct,
    /// Background clicked
    Wrong,
    /// Run lost
    GameOver,
    /// Level cleared / run won
    Win,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Tap => "tap",
            SoundEffect::Correct => "point",
            SoundEffect::Wrong => "wrong",
            SoundEffect::GameOver => "gameover",
            SoundEffect::Win => "win",
        }
    }
}

/// Something that can play one-shot sound effects
pub trait AudioSink {
    /// Play a sound effect. Must not block; a missing clip is skipped silently.
    fn play(&mut self, effect: SoundEffect);
}
