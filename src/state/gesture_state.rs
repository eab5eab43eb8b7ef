//! Gesture observation and latch structures

use serde::{Deserialize, Serialize};

/// Most recent recognizer output for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureObservation {
    #[serde(rename = "gestureName", alias = "name")]
    pub name: String,
    #[serde(rename = "isActive", alias = "active")]
    pub active: bool,
}

impl GestureObservation {
    pub fn new(name: impl Into<String>, active: bool) -> Self {
        Self {
            name: name.into(),
            active,
        }
    }

    /// Observation for a frame where the recognizer reported nothing
    pub fn none() -> Self {
        Self::new("None", false)
    }

    /// True when `gesture` is being actively reported this frame
    pub fn shows(&self, gesture: &str) -> bool {
        self.active && self.name == gesture
    }

    /// True when `gesture` is named but reported as released this frame
    pub fn releases(&self, gesture: &str) -> bool {
        !self.active && self.name == gesture
    }
}

/// Fires once per sustained trigger occurrence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureLatch {
    fired: bool,
}

impl GestureLatch {
    /// Set the latch; returns true only if it was not already set
    pub fn trigger(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn release(&mut self) {
        self.fired = false;
    }

    pub fn is_set(&self) -> bool {
        self.fired
    }
}
