//! Level countdown timer
//!
//! Counts down while running. Expiry is edge-triggered: the step that takes
//! the remaining time from positive to zero or below reports it, later steps
//! do not.

use serde::{Deserialize, Serialize};

/// Result of advancing the timer by one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerTick {
    /// Remaining seconds, clamped at zero
    pub remaining: f32,
    /// True only on the step that crossed zero
    pub expired: bool,
}

/// Countdown for the active level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTimer {
    budget: f32,
    /// Unclamped; goes negative on the expiring step
    remaining: f32,
    running: bool,
    expired: bool,
}

impl LevelTimer {
    /// A stopped timer holding a full budget
    pub fn new(budget: f32) -> Self {
        Self {
            budget,
            remaining: budget,
            running: false,
            expired: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Refill to `budget` and stop
    pub fn reset(&mut self, budget: f32) {
        self.budget = budget;
        self.remaining = budget;
        self.running = false;
        self.expired = false;
    }

    /// Advance by `dt` seconds. No-op while stopped.
    pub fn tick(&mut self, dt: f32) -> TimerTick {
        if !self.running || self.expired {
            return TimerTick {
                remaining: self.remaining(),
                expired: false,
            };
        }

        self.remaining -= sanitize_dt(dt);
        let expired = self.remaining <= 0.0;
        if expired {
            self.expired = true;
            self.running = false;
        }

        TimerTick {
            remaining: self.remaining(),
            expired,
        }
    }

    /// Remaining seconds, never negative
    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    pub fn budget(&self) -> f32 {
        self.budget
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_expired(&self) -> bool {
        self.expired
    }

    /// `mm:ss` for the HUD
    pub fn display(&self) -> String {
        crate::format_mm_ss(self.remaining())
    }
}

/// Non-finite or negative frame deltas count as zero
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}
