//! Error types for host capabilities and the widget handle

use thiserror::Error;

/// Failure of a host capability (notifications, audio).
/// Always non-fatal for the countdown: logged at the call site and dropped.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("capability not supported by this host")]
    Unsupported,

    #[error("notification permission denied")]
    PermissionDenied,

    #[error("{program} failed: {message}")]
    Command { program: String, message: String },

    #[error("audio playback failed: {0}")]
    Playback(String),
}

/// Failure talking to a widget driver
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("rest timer widget is no longer running")]
    Stopped,
}
