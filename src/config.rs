//! Configuration and CLI argument handling

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::state::{NotificationPermission, TimerSettings, Viewport};

/// Which host capabilities back notifications and the completion sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifierKind {
    /// notify-send and canberra-gtk-play
    Desktop,
    /// Log lines only
    Log,
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "rest-timer")]
#[command(about = "Rest-between-sets countdown widget served to a local page")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial rest duration in seconds
    #[arg(short, long, default_value = "60")]
    pub total: u64,

    /// Seconds added or removed by the +/- controls
    #[arg(long, default_value = "30")]
    pub step: u64,

    /// Shortest allowed rest duration in seconds
    #[arg(long, default_value = "30")]
    pub floor: u64,

    /// Longest allowed rest duration in seconds
    #[arg(long, default_value = "5999")]
    pub max: u64,

    /// Seconds between finishing and the automatic reset
    #[arg(long, default_value = "5")]
    pub auto_reset_secs: u64,

    /// Grace delay before an outside click minimizes the widget
    #[arg(long, default_value = "50")]
    pub minimize_grace_ms: u64,

    /// Pointer travel in pixels that turns a press into a drag
    #[arg(long, default_value = "4")]
    pub drag_threshold: f64,

    /// Initial viewport width in pixels
    #[arg(long, default_value = "390")]
    pub viewport_width: f64,

    /// Initial viewport height in pixels
    #[arg(long, default_value = "844")]
    pub viewport_height: f64,

    /// Edge length of the minimized widget in pixels
    #[arg(long, default_value = "72")]
    pub widget_size: f64,

    /// Notification backend
    #[arg(long, value_enum, default_value = "desktop")]
    pub notifier: NotifierKind,

    /// Starting notification permission for the log backend
    #[arg(long, default_value = "not-asked")]
    pub permission: NotificationPermission,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Widget settings described by the command line
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            total_seconds: self.total,
            step_seconds: self.step,
            floor_seconds: self.floor,
            max_seconds: self.max,
            auto_reset_delay: Duration::from_secs(self.auto_reset_secs),
            minimize_grace: Duration::from_millis(self.minimize_grace_ms),
            drag_threshold_px: self.drag_threshold,
            widget_size_px: self.widget_size,
            viewport: Viewport::new(self.viewport_width, self.viewport_height),
            ..TimerSettings::default()
        }
        .normalized()
    }
}
