//! Background tasks module
//!
//! This module contains the task that drives a mounted rest timer.

pub mod widget_driver;

// Re-export main types
pub use widget_driver::{mount, CloseCallback, WidgetHandle, WidgetHost};
