//! Capabilities the rest timer consumes from its host

use async_trait::async_trait;

use crate::{
    error::HostError,
    state::{format_mm_ss, NotificationPermission},
};

/// Tag shared by every completion notice so the host replaces instead of stacking
pub const FINISHED_TAG: &str = "rest-timer-finished";

/// A system notification to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub tag: String,
}

impl Notice {
    pub fn rest_finished(total_seconds: u64) -> Self {
        Self {
            title: "Rest finished".to_string(),
            body: format!(
                "{} of rest is over. Time for the next set!",
                format_mm_ss(total_seconds)
            ),
            tag: FINISHED_TAG.to_string(),
        }
    }
}

/// Permission-gated system notifications
#[async_trait]
pub trait NotificationHost: Send + Sync {
    /// Permission as currently recorded by the host, without prompting
    fn current_permission(&self) -> NotificationPermission;

    /// Ask the host for permission and return its answer
    async fn request(&self) -> NotificationPermission;

    async fn notify(&self, notice: &Notice) -> Result<(), HostError>;
}

/// One-shot completion sound
#[async_trait]
pub trait AudioCue: Send + Sync {
    async fn play(&self) -> Result<(), HostError>;
}
