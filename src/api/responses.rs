//! Output response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{DisplayState, StatusSnapshot, TimerMode};

/// One rendered frame of the stopwatch widget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayResponse {
    #[serde(flatten)]
    pub display: DisplayState,
    /// Countdown digit or `MM:SS.CC`
    pub text: String,
    pub status: String,
    pub gesture: Option<String>,
    pub hint: String,
    pub timestamp: DateTime<Utc>,
}

impl DisplayResponse {
    /// Build a response for a published status
    pub fn new(snapshot: &StatusSnapshot, start_trigger: &str) -> Self {
        Self {
            display: snapshot.display,
            text: snapshot.display.formatted(),
            status: status_label(snapshot.display.mode).to_string(),
            gesture: snapshot.active_gesture.clone(),
            hint: format!("Show \"{}\" gesture to start", start_trigger),
            timestamp: Utc::now(),
        }
    }

    /// Single-line text rendering
    pub fn render_line(&self) -> String {
        let mut line = format!("{} • {}", self.text, self.status);
        if let Some(gesture) = &self.gesture {
            line.push_str(&format!(" • Gesture detected: {}", gesture));
        }
        line.push_str(" • ");
        line.push_str(&self.hint);
        line
    }
}

pub fn status_label(mode: TimerMode) -> &'static str {
    match mode {
        TimerMode::Idle => "Ready",
        TimerMode::CountingDown => "Countdown...",
        TimerMode::Running => "Running",
        TimerMode::Stopped => "Stopped",
    }
}
