//! Input line protocol

use serde::{Deserialize, Serialize};

use crate::{engine::Command, state::GestureObservation};

/// One input line: a recognizer frame or a manual command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputMessage {
    Gesture(GestureObservation),
    Command { command: Command },
}

impl From<GestureObservation> for InputMessage {
    fn from(observation: GestureObservation) -> Self {
        InputMessage::Gesture(observation)
    }
}

impl From<Command> for InputMessage {
    fn from(command: Command) -> Self {
        InputMessage::Command { command }
    }
}

/// Parse a JSON message, or a bare `start` / `stop` / `reset` word
pub fn parse_line(line: &str) -> Result<InputMessage, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err("Empty input line".to_string());
    }

    if trimmed.starts_with('{') {
        serde_json::from_str(trimmed).map_err(|e| format!("Invalid input message: {}", e))
    } else {
        trimmed.parse::<Command>().map(InputMessage::from)
    }
}
