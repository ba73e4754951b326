//! Host capability module
//!
//! This module contains the notification and audio interfaces the rest timer
//! consumes, and the implementations the host binary can choose from.

pub mod desktop;
pub mod host;
pub mod log_only;

// Re-export main types
pub use desktop::{CommandAudio, DesktopHost};
pub use host::{AudioCue, Notice, NotificationHost, FINISHED_TAG};
pub use log_only::{LogOnlyHost, SilentAudio};
