//! State management module
//!
//! This module contains the rest timer state machine and the value types it
//! is built from, plus the shared state of the host process.

pub mod app_state;
pub mod countdown;
pub mod display;
pub mod machine;
pub mod permission;
pub mod settings;
pub mod snapshot;

// Re-export main types
pub use app_state::AppState;
pub use countdown::{format_mm_ss, CountdownState, ProgressColor};
pub use display::{DisplayMode, Position, Viewport};
pub use machine::{Effect, Event, RestTimer, TimerToken};
pub use permission::NotificationPermission;
pub use settings::TimerSettings;
pub use snapshot::WidgetSnapshot;
