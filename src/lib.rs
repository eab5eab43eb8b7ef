//! Gesture Stopwatch - a countdown and stopwatch driven by hand gestures
//!
//! This library provides the timer state machine behind a hand-tracking demo:
//! a 3-second countdown that hands over to a stopwatch, started and stopped by
//! recognised gestures or by manual commands.

pub mod api;
pub mod config;
pub mod engine;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{Command, Stopwatch, TimerEngine};
pub use state::{format_time, AppState, DisplayState, GestureObservation, TimerMode, TimerState};
pub use utils::signals::shutdown_signal;
