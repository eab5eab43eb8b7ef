//! Configuration and CLI argument handling

use std::time::Duration;
use clap::{ArgAction, Parser};

use crate::{
    engine::{EngineConfig, GestureConfig},
    state::StopwatchSettings,
    tasks::OutputFormat,
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "gesture-stopwatch")]
#[command(about = "Gesture-driven countdown and stopwatch fed by hand-tracking frames on stdin")]
#[command(version)]
pub struct Config {
    /// Gesture that starts the countdown while active
    #[arg(long, default_value = "Pointing_Up")]
    pub start_gesture: String,

    /// Gesture that stops a gesture-started stopwatch when released
    #[arg(long, default_value = "Open_Palm")]
    pub stop_gesture: String,

    /// Stopwatch refresh interval in milliseconds
    #[arg(long, default_value = "50", value_parser = clap::value_parser!(u64).range(10..=1000))]
    pub tick_ms: u64,

    /// Continue from the previous elapsed time when restarted without a reset
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub resumable: bool,

    /// Let the stop gesture end a run started with the manual start command
    #[arg(long)]
    pub gesture_stops_manual: bool,

    /// Display output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Build the stopwatch settings these arguments describe
    pub fn settings(&self) -> StopwatchSettings {
        StopwatchSettings {
            engine: EngineConfig {
                tick_interval: self.tick_interval(),
                resumable: self.resumable,
            },
            gestures: GestureConfig {
                start_trigger: self.start_gesture.clone(),
                stop_trigger: self.stop_gesture.clone(),
                gesture_stops_manual: self.gesture_stops_manual,
            },
        }
    }
}
