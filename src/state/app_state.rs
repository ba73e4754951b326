//! Shared state of the host process

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{Event, WidgetSnapshot};
use crate::{error::WidgetError, tasks::WidgetHandle};

/// Host-side state shared by all HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// Handle to the mounted rest timer
    pub widget: WidgetHandle,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState around a mounted widget
    pub fn new(widget: WidgetHandle, port: u16, host: String) -> Self {
        Self {
            widget,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Forward a user action to the widget and record it as the last action
    pub async fn dispatch(&self, action: &str, event: Event) -> Result<WidgetSnapshot, WidgetError> {
        info!("Widget action: {}", action);
        let snapshot = self.widget.dispatch(event).await?;

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        } else {
            warn!("Failed to record last action: {}", action);
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    /// Latest widget snapshot, or an error once the widget is unmounted
    pub fn snapshot(&self) -> Result<WidgetSnapshot, WidgetError> {
        if !self.widget.is_mounted() {
            return Err(WidgetError::Stopped);
        }
        Ok(self.widget.snapshot())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
