//! Timer state structure and display snapshot

use std::{fmt, time::Duration};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Seconds shown by a fresh countdown
pub const COUNTDOWN_SECONDS: u8 = 3;

/// Countdown and stopwatch state; exactly one variant holds at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimerState {
    #[default]
    Idle,
    CountingDown { remaining: u8, started_at: Instant },
    Running { elapsed: Duration, started_at: Instant },
    Stopped { final_elapsed: Duration },
}

impl TimerState {
    pub fn mode(&self) -> TimerMode {
        match self {
            TimerState::Idle => TimerMode::Idle,
            TimerState::CountingDown { .. } => TimerMode::CountingDown,
            TimerState::Running { .. } => TimerMode::Running,
            TimerState::Stopped { .. } => TimerMode::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }

    pub fn is_counting_down(&self) -> bool {
        matches!(self, TimerState::CountingDown { .. })
    }

    /// Snapshot for rendering
    pub fn display(&self) -> DisplayState {
        match *self {
            TimerState::Idle => DisplayState::idle(),
            TimerState::CountingDown { remaining, .. } => DisplayState {
                mode: TimerMode::CountingDown,
                countdown_value: Some(remaining),
                elapsed_ms: None,
            },
            TimerState::Running { elapsed, .. } => DisplayState {
                mode: TimerMode::Running,
                countdown_value: None,
                elapsed_ms: Some(duration_ms(elapsed)),
            },
            TimerState::Stopped { final_elapsed } => DisplayState {
                mode: TimerMode::Stopped,
                countdown_value: None,
                elapsed_ms: Some(duration_ms(final_elapsed)),
            },
        }
    }
}

/// Tag of [`TimerState`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerMode {
    Idle,
    CountingDown,
    Running,
    Stopped,
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerMode::Idle => write!(f, "idle"),
            TimerMode::CountingDown => write!(f, "counting down"),
            TimerMode::Running => write!(f, "running"),
            TimerMode::Stopped => write!(f, "stopped"),
        }
    }
}

/// Read-only snapshot consumed by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    pub mode: TimerMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countdown_value: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
}

impl DisplayState {
    pub fn idle() -> Self {
        Self {
            mode: TimerMode::Idle,
            countdown_value: None,
            elapsed_ms: Some(0),
        }
    }

    /// Countdown digit while counting down, `MM:SS.CC` otherwise
    pub fn formatted(&self) -> String {
        match self.countdown_value {
            Some(value) if self.mode == TimerMode::CountingDown => value.to_string(),
            _ => format_time(self.elapsed_ms.unwrap_or(0)),
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Format milliseconds as `MM:SS.CC`
pub fn format_time(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let centis = (ms % 1_000) / 10;
    format!("{:02}:{:02}.{:02}", minutes, seconds, centis)
}

pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
