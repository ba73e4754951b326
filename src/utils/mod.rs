//! Process-level helpers for the host binary

pub mod signals;

pub use signals::shutdown_signal;
