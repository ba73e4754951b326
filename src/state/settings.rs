//! Tunables of the rest timer

use std::time::Duration;

use super::display::Viewport;

pub const DEFAULT_TOTAL_SECONDS: u64 = 60;
pub const DEFAULT_STEP_SECONDS: u64 = 30;
pub const DEFAULT_FLOOR_SECONDS: u64 = 30;
pub const DEFAULT_MAX_SECONDS: u64 = 99 * 60 + 59;
pub const DEFAULT_AUTO_RESET: Duration = Duration::from_secs(5);
pub const DEFAULT_MINIMIZE_GRACE: Duration = Duration::from_millis(50);
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 4.0;
pub const DEFAULT_WIDGET_SIZE_PX: f64 = 72.0;
pub const DEFAULT_DOCK_MARGIN_PX: f64 = 16.0;
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Widget configuration. Durations are in whole seconds except the two delays.
#[derive(Debug, Clone)]
pub struct TimerSettings {
    pub total_seconds: u64,
    pub step_seconds: u64,
    pub floor_seconds: u64,
    pub max_seconds: u64,
    /// Delay between finishing and the automatic return to full duration
    pub auto_reset_delay: Duration,
    /// Grace delay before an outside interaction minimizes the widget
    pub minimize_grace: Duration,
    pub drag_threshold_px: f64,
    pub widget_size_px: f64,
    pub dock_margin_px: f64,
    pub viewport: Viewport,
}

impl TimerSettings {
    /// Bring the starting duration inside `[floor, max]`
    pub fn normalized(mut self) -> Self {
        self.floor_seconds = self.floor_seconds.max(1);
        self.max_seconds = self.max_seconds.max(self.floor_seconds);
        self.step_seconds = self.step_seconds.max(1);
        self.total_seconds = self
            .total_seconds
            .clamp(self.floor_seconds, self.max_seconds);
        self
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            total_seconds: DEFAULT_TOTAL_SECONDS,
            step_seconds: DEFAULT_STEP_SECONDS,
            floor_seconds: DEFAULT_FLOOR_SECONDS,
            max_seconds: DEFAULT_MAX_SECONDS,
            auto_reset_delay: DEFAULT_AUTO_RESET,
            minimize_grace: DEFAULT_MINIMIZE_GRACE,
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            widget_size_px: DEFAULT_WIDGET_SIZE_PX,
            dock_margin_px: DEFAULT_DOCK_MARGIN_PX,
            viewport: Viewport::new(390.0, 844.0),
        }
    }
}
