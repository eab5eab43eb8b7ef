//! State management module
//!
//! This module contains the timer and gesture state structures and the shared
//! application state that owns the live stopwatch.

pub mod app_state;
pub mod gesture_state;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, LiveStopwatch, StatusSnapshot, StopwatchSettings};
pub use gesture_state::{GestureLatch, GestureObservation};
pub use timer_state::{format_time, DisplayState, TimerMode, TimerState};
