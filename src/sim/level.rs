//! Level layouts
//!
//! Authored data: where each level's targets sit and how big their
//! clickable regions are. Layouts never change at runtime; only the
//! registry's resolved flags do.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::targets::TargetRef;
use crate::settings::ConfigError;

/// Axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// One target's placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetDef {
    /// Center in world space (effects spawn here)
    pub position: Vec2,
    /// Radius of the circular clickable region
    pub radius: f32,
}

impl TargetDef {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            radius,
        }
    }

    /// Whether a world point falls inside the clickable region
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance_squared(point) <= self.radius * self.radius
    }
}

/// One level: a fixed, ordered set of targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub targets: Vec<TargetDef>,
}

/// The full level sequence plus the shared background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    /// Clicks inside this rectangle that miss every target are penalized
    pub background: Bounds,
    pub levels: Vec<LevelDef>,
}

/// Radius used by the reference layout
const REFERENCE_RADIUS: f32 = 0.6;

impl LevelSet {
    /// Built-in layout: three levels of five targets on a 16x9 background
    pub fn reference() -> Self {
        let r = REFERENCE_RADIUS;
        let level = |points: [(f32, f32); 5]| LevelDef {
            targets: points
                .iter()
                .map(|&(x, y)| TargetDef::new(x, y, r))
                .collect(),
        };
        Self {
            background: Bounds::new(Vec2::new(-8.0, -4.5), Vec2::new(8.0, 4.5)),
            levels: vec![
                level([(-6.0, 3.0), (-2.5, -1.5), (0.5, 2.0), (3.5, -3.0), (6.5, 1.0)]),
                level([(-7.0, -3.5), (-4.0, 1.5), (-0.5, -2.5), (2.5, 3.5), (5.5, -0.5)]),
                level([(-5.5, 0.0), (-1.5, 3.5), (1.0, -0.5), (4.0, 2.5), (7.0, -3.5)]),
            ],
        }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Target count of a level (0 if the level does not exist)
    pub fn target_count(&self, level: usize) -> usize {
        self.levels.get(level).map_or(0, |l| l.targets.len())
    }

    pub fn target(&self, target: TargetRef) -> Option<&TargetDef> {
        self.levels.get(target.level)?.targets.get(target.index)
    }

    /// Reject layouts the session cannot play
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::Invalid("level set has no levels".to_string()));
        }
        for (i, level) in self.levels.iter().enumerate() {
            if level.targets.is_empty() {
                return Err(ConfigError::Invalid(format!("level {i} has no targets")));
            }
            if let Some(t) = level
                .targets
                .iter()
                .find(|t| !t.radius.is_finite() || t.radius <= 0.0)
            {
                return Err(ConfigError::Invalid(format!(
                    "level {i} has a target with radius {}",
                    t.radius
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a layout from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let set: Self = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Load a layout from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let set = Self::from_json_str(&json)?;
        log::info!("Loaded {} levels from {}", set.level_count(), path.display());
        Ok(set)
    }
}
