//! Read-only view of the widget published after every event

use serde::{Deserialize, Serialize};

use super::{
    countdown::ProgressColor,
    display::{DisplayMode, Position},
    permission::NotificationPermission,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    pub running: bool,
    pub finished: bool,
    pub celebration_active: bool,
    pub display_mode: DisplayMode,
    pub position: Position,
    pub dragging: bool,
    pub visible: bool,
    pub permission: NotificationPermission,
    /// Remaining time as `MM:SS`
    pub display: String,
    /// Remaining fraction of the duration
    pub progress: f64,
    pub color: ProgressColor,
}
