//! Rest Timer - A rest-between-sets countdown widget
//!
//! This library provides the rest timer state machine, the tap/drag gesture
//! classifier, host notification and audio capabilities, the task that drives
//! a mounted widget, and an HTTP surface for an embedding page.

pub mod api;
pub mod config;
pub mod error;
pub mod gesture;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{HostError, WidgetError};
pub use state::{AppState, Event, RestTimer, TimerSettings, WidgetSnapshot};
pub use tasks::{mount, WidgetHandle, WidgetHost};
pub use utils::signals::shutdown_signal;
