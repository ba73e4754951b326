//! Countdown value, formatting and progress banding

use serde::{Deserialize, Serialize};

/// Remaining/total seconds of the rest countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    pub running: bool,
}

impl CountdownState {
    /// Create an idle countdown at full duration
    pub fn new(total_seconds: u64) -> Self {
        Self {
            remaining_seconds: total_seconds,
            total_seconds,
            running: false,
        }
    }

    /// Restore the full duration and stop
    pub fn reset(&mut self) {
        self.remaining_seconds = self.total_seconds;
        self.running = false;
    }

    /// Decrement by one second. Returns true when this tick reached zero.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        self.remaining_seconds == 0
    }

    /// Change the total duration, mirroring it into `remaining_seconds` when stopped
    pub fn set_total(&mut self, total_seconds: u64) {
        self.total_seconds = total_seconds;
        if self.running {
            self.remaining_seconds = self.remaining_seconds.min(total_seconds);
        } else {
            self.remaining_seconds = total_seconds;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Fraction of the duration still remaining, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        self.remaining_seconds as f64 / self.total_seconds as f64
    }

    pub fn color(&self) -> ProgressColor {
        ProgressColor::for_fraction(self.remaining_seconds, self.total_seconds)
    }

    pub fn display(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }
}

/// Colour band of the progress ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressColor {
    Nominal,
    Warning,
    Alert,
}

impl ProgressColor {
    /// `<= 20%` remaining is alert, `<= 50%` is warning
    pub fn for_fraction(remaining: u64, total: u64) -> Self {
        // integer comparison keeps the 20/50 boundaries exact
        let remaining = remaining as u128 * 100;
        let total = total as u128;
        if remaining <= total * 20 {
            ProgressColor::Alert
        } else if remaining <= total * 50 {
            ProgressColor::Warning
        } else {
            ProgressColor::Nominal
        }
    }
}

/// Render seconds as zero-padded `MM:SS`
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
