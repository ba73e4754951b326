//! Host capabilities that only write to the log

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{info, warn};

use super::host::{AudioCue, Notice, NotificationHost};
use crate::{error::HostError, state::NotificationPermission};

/// Notification host for headless runs. A pending request is answered with
/// `Granted`; an answer given up front is kept.
#[derive(Debug)]
pub struct LogOnlyHost {
    permission: Mutex<NotificationPermission>,
}

impl LogOnlyHost {
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission: Mutex::new(permission),
        }
    }
}

#[async_trait]
impl NotificationHost for LogOnlyHost {
    fn current_permission(&self) -> NotificationPermission {
        self.permission
            .lock()
            .map(|permission| *permission)
            .unwrap_or(NotificationPermission::Denied)
    }

    async fn request(&self) -> NotificationPermission {
        match self.permission.lock() {
            Ok(mut permission) => {
                if *permission == NotificationPermission::NotAsked {
                    *permission = NotificationPermission::Granted;
                }
                *permission
            }
            Err(e) => {
                warn!("Failed to lock notification permission: {}", e);
                NotificationPermission::Denied
            }
        }
    }

    async fn notify(&self, notice: &Notice) -> Result<(), HostError> {
        if self.current_permission() != NotificationPermission::Granted {
            return Err(HostError::PermissionDenied);
        }
        info!("[NOTIFY:{}] {} - {}", notice.tag, notice.title, notice.body);
        Ok(())
    }
}

/// Audio cue that logs instead of playing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

#[async_trait]
impl AudioCue for SilentAudio {
    async fn play(&self) -> Result<(), HostError> {
        info!("[CUE] rest finished");
        Ok(())
    }
}
