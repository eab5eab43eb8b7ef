//! Input message handlers

use tracing::debug;

use super::messages::InputMessage;
use crate::state::{AppState, DisplayState};

/// Dispatch one input message to the stopwatch
pub fn handle_input(state: &AppState, message: InputMessage) -> Result<DisplayState, String> {
    match message {
        InputMessage::Gesture(observation) => {
            debug!("Frame: {} (active={})", observation.name, observation.active);
            state.observe_gesture(&observation)
        }
        InputMessage::Command { command } => {
            debug!("Command: {}", command);
            state
                .apply_command(command)
                .map_err(|e| format!("{} command: {}", command, e))
        }
    }
}
