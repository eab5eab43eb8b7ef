//! Timer engine module
//!
//! This module contains the countdown/stopwatch state machine, the adapter
//! that turns gesture observations into timer commands, and the controller
//! that owns both.

pub mod gesture_adapter;
pub mod stopwatch;
pub mod timer_engine;

// Re-export main types
pub use gesture_adapter::{GestureAction, GestureAdapter, GestureConfig};
pub use stopwatch::{Command, Stopwatch};
pub use timer_engine::{EngineConfig, TimerEngine, COUNTDOWN_INTERVAL, DEFAULT_TICK_INTERVAL};
