//! Timer engine and gesture adapter bundled behind one owner

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    gesture_adapter::{GestureAction, GestureAdapter, GestureConfig},
    timer_engine::{EngineConfig, TimerEngine},
};
use crate::{
    services::{Clock, ScheduleHandle, Scheduler},
    state::{DisplayState, GestureObservation, TimerState},
};

/// Manual command from the user interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Start,
    Stop,
    Reset,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Reset => "reset",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Command::Start),
            "stop" => Ok(Command::Stop),
            "reset" => Ok(Command::Reset),
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}

/// One stopwatch widget: its engine plus the adapter feeding it
#[derive(Debug)]
pub struct Stopwatch<C, S> {
    engine: TimerEngine<C, S>,
    adapter: GestureAdapter,
}

impl<C: Clock, S: Scheduler> Stopwatch<C, S> {
    pub fn new(engine_config: EngineConfig, gesture_config: GestureConfig, clock: C, scheduler: S) -> Self {
        Self {
            engine: TimerEngine::new(engine_config, clock, scheduler),
            adapter: GestureAdapter::new(gesture_config),
        }
    }

    pub fn engine(&self) -> &TimerEngine<C, S> {
        &self.engine
    }

    pub fn adapter(&self) -> &GestureAdapter {
        &self.adapter
    }

    pub fn state(&self) -> &TimerState {
        self.engine.state()
    }

    pub fn display_state(&self) -> DisplayState {
        self.engine.display_state()
    }

    /// Apply a manual command; returns whether the timer changed
    pub fn command(&mut self, command: Command) -> bool {
        let changed = match command {
            Command::Start => self.adapter.manual_start(&mut self.engine),
            Command::Stop => self.adapter.manual_stop(&mut self.engine),
            Command::Reset => {
                let was = self.engine.display_state();
                self.adapter.manual_reset(&mut self.engine);
                was != self.engine.display_state()
            }
        };
        if changed {
            info!("Manual {} applied, now {}", command, self.engine.mode());
        }
        changed
    }

    pub fn observe(&mut self, observation: &GestureObservation) -> GestureAction {
        self.adapter.observe(observation, &mut self.engine)
    }

    pub fn on_tick(&mut self, handle: ScheduleHandle) -> bool {
        self.engine.on_tick(handle)
    }

    pub fn teardown(&mut self) {
        self.engine.teardown();
    }
}
