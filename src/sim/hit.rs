//! Click classification
//!
//! Turns the region found under the pointer into a gameplay outcome. Holds
//! no state; the only side effect is the tap cue played for every click.

use serde::{Deserialize, Serialize};

use super::targets::{TargetRef, TargetRegistry};
use crate::audio::{AudioSink, SoundEffect};
use crate::platform::RegionTag;

/// Outcome of one click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    /// Background clicked: costs a try
    Miss,
    /// Unresolved target of the active level clicked
    TargetHit(TargetRef),
    /// Nothing relevant under the pointer: free
    None,
}

/// Classify a hit-test result against the registry.
///
/// Resolved targets and targets of inactive levels classify as `None`.
pub fn classify(hit: Option<RegionTag>, registry: &TargetRegistry) -> HitKind {
    match hit {
        Some(RegionTag::Background) => HitKind::Miss,
        Some(RegionTag::Target(target)) if registry.is_hittable(target) => {
            HitKind::TargetHit(target)
        }
        Some(RegionTag::Target(_)) | None => HitKind::None,
    }
}

/// Play the tap cue and classify
pub fn dispatch<A: AudioSink + ?Sized>(
    hit: Option<RegionTag>,
    registry: &TargetRegistry,
    audio: &mut A,
) -> HitKind {
    audio.play(SoundEffect::Tap);
    let kind = classify(hit, registry);
    log::debug!("Clicked on: {:?} -> {:?}", hit, kind);
    kind
}
