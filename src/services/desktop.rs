//! Desktop notifications and sounds through the freedesktop command line tools

use std::{io, sync::Mutex};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::host::{AudioCue, Notice, NotificationHost};
use crate::{error::HostError, state::NotificationPermission};

const NOTIFY_SEND: &str = "notify-send";
const CANBERRA: &str = "canberra-gtk-play";
const APP_NAME: &str = "Rest Timer";

/// A tool missing from `PATH` means the host cannot do this at all
fn spawn_error(program: &str, error: io::Error) -> HostError {
    match error.kind() {
        io::ErrorKind::NotFound => HostError::Unsupported,
        _ => HostError::Command {
            program: program.to_string(),
            message: error.to_string(),
        },
    }
}

/// Notifications via `notify-send`. Permission is granted once the tool is
/// found to be runnable and denied otherwise.
#[derive(Debug, Default)]
pub struct DesktopHost {
    permission: Mutex<NotificationPermission>,
}

impl DesktopHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, permission: NotificationPermission) {
        match self.permission.lock() {
            Ok(mut current) => *current = permission,
            Err(e) => warn!("Failed to lock notification permission: {}", e),
        }
    }
}

#[async_trait]
impl NotificationHost for DesktopHost {
    fn current_permission(&self) -> NotificationPermission {
        self.permission
            .lock()
            .map(|permission| *permission)
            .unwrap_or(NotificationPermission::Denied)
    }

    async fn request(&self) -> NotificationPermission {
        let current = self.current_permission();
        if current.is_settled() {
            return current;
        }

        let permission = match Command::new(NOTIFY_SEND).arg("--version").output().await {
            Ok(output) if output.status.success() => {
                info!("{} is available, notifications granted", NOTIFY_SEND);
                NotificationPermission::Granted
            }
            Ok(output) => {
                warn!(
                    "{} --version exited with {}, notifications denied",
                    NOTIFY_SEND, output.status
                );
                NotificationPermission::Denied
            }
            Err(e) => {
                warn!("{} is not available ({}), notifications denied", NOTIFY_SEND, e);
                NotificationPermission::Denied
            }
        };
        self.record(permission);
        permission
    }

    async fn notify(&self, notice: &Notice) -> Result<(), HostError> {
        if self.current_permission() != NotificationPermission::Granted {
            return Err(HostError::PermissionDenied);
        }

        debug!(tag = %notice.tag, "Sending desktop notification");
        let output = Command::new(NOTIFY_SEND)
            .arg("--app-name")
            .arg(APP_NAME)
            .arg("--hint")
            .arg(format!("string:x-canonical-private-synchronous:{}", notice.tag))
            .arg(&notice.title)
            .arg(&notice.body)
            .output()
            .await
            .map_err(|e| spawn_error(NOTIFY_SEND, e))?;

        if !output.status.success() {
            return Err(HostError::Command {
                program: NOTIFY_SEND.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("Desktop notification sent: {}", notice.title);
        Ok(())
    }
}

/// Completion sound via `canberra-gtk-play` and the sound theme
#[derive(Debug, Clone)]
pub struct CommandAudio {
    sound_id: String,
}

impl CommandAudio {
    pub fn new(sound_id: impl Into<String>) -> Self {
        Self {
            sound_id: sound_id.into(),
        }
    }
}

impl Default for CommandAudio {
    fn default() -> Self {
        Self::new("complete")
    }
}

#[async_trait]
impl AudioCue for CommandAudio {
    async fn play(&self) -> Result<(), HostError> {
        let output = Command::new(CANBERRA)
            .args(["-i", self.sound_id.as_str()])
            .output()
            .await
            .map_err(|e| spawn_error(CANBERRA, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HostError::Playback(format!("{}: {}", CANBERRA, stderr.trim())));
        }

        debug!(sound = %self.sound_id, "Completion sound played");
        Ok(())
    }
}
