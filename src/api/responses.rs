//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::WidgetSnapshot;

/// API response structure for widget action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: WidgetSnapshot,
}

impl ApiResponse {
    /// Create a new API response, deriving the status from the snapshot
    pub fn new(message: impl Into<String>, timer: WidgetSnapshot) -> Self {
        let status = if timer.finished {
            "finished"
        } else if timer.running {
            "running"
        } else if timer.remaining_seconds < timer.total_seconds {
            "paused"
        } else {
            "idle"
        };
        Self {
            status: status.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Status response with host metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: WidgetSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of `POST /timer/visibility`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VisibilityRequest {
    pub visible: bool,
}
