//! Gesture observations to timer commands
//!
//! The adapter holds only two latches and the started-by-gesture flag. A held
//! start gesture fires once; it can fire again after a frame in which it is
//! not reported.

use tracing::{debug, info};

use crate::{
    engine::timer_engine::TimerEngine,
    services::{Clock, Scheduler},
    state::{GestureLatch, GestureObservation, TimerMode},
};

/// Which gestures drive the timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureConfig {
    /// Gesture that starts the countdown while it is active
    pub start_trigger: String,
    /// Gesture that stops the stopwatch when reported as released
    pub stop_trigger: String,
    /// Allow the stop gesture to end a manually started run
    pub gesture_stops_manual: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            start_trigger: "Pointing_Up".to_string(),
            stop_trigger: "Open_Palm".to_string(),
            gesture_stops_manual: false,
        }
    }
}

/// What an observation did to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAction {
    None,
    StartedCountdown,
    StoppedStopwatch,
}

#[derive(Debug, Default)]
pub struct GestureAdapter {
    config: GestureConfig,
    start_latch: GestureLatch,
    stop_latch: GestureLatch,
    started_by_gesture: bool,
}

impl GestureAdapter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            start_latch: GestureLatch::default(),
            stop_latch: GestureLatch::default(),
            started_by_gesture: false,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn started_by_gesture(&self) -> bool {
        self.started_by_gesture
    }

    pub fn start_latched(&self) -> bool {
        self.start_latch.is_set()
    }

    pub fn stop_latched(&self) -> bool {
        self.stop_latch.is_set()
    }

    /// Consume one frame's observation
    pub fn observe<C: Clock, S: Scheduler>(
        &mut self,
        observation: &GestureObservation,
        engine: &mut TimerEngine<C, S>,
    ) -> GestureAction {
        let mut action = GestureAction::None;

        if observation.shows(&self.config.start_trigger) {
            let startable = matches!(engine.mode(), TimerMode::Idle | TimerMode::Stopped);
            if startable && self.start_latch.trigger() && engine.start_countdown() {
                info!("Start gesture {} detected, countdown started", observation.name);
                self.started_by_gesture = true;
                action = GestureAction::StartedCountdown;
            }
        } else {
            self.start_latch.release();
        }

        if observation.releases(&self.config.stop_trigger) {
            let stoppable = engine.mode() == TimerMode::Running
                && (self.started_by_gesture || self.config.gesture_stops_manual);
            if stoppable && self.stop_latch.trigger() && engine.stop_stopwatch() {
                info!("Stop gesture {} detected, stopwatch stopped", observation.name);
                action = GestureAction::StoppedStopwatch;
            }
        } else {
            self.stop_latch.release();
        }

        action
    }

    /// Start button: bypasses the latches and marks the run as manual
    ///
    /// A rejected start leaves the started-by-gesture flag untouched.
    pub fn manual_start<C: Clock, S: Scheduler>(&mut self, engine: &mut TimerEngine<C, S>) -> bool {
        let started = engine.start_countdown();
        if started {
            self.started_by_gesture = false;
        }
        started
    }

    /// Stop button: cancels a countdown or stops a running stopwatch
    pub fn manual_stop<C: Clock, S: Scheduler>(&mut self, engine: &mut TimerEngine<C, S>) -> bool {
        match engine.mode() {
            TimerMode::CountingDown => engine.cancel_countdown(),
            TimerMode::Running => engine.stop_stopwatch(),
            mode => {
                debug!("Ignoring manual stop while {}", mode);
                false
            }
        }
    }

    /// Reset button: resets the engine and forgets all gesture bookkeeping
    pub fn manual_reset<C: Clock, S: Scheduler>(&mut self, engine: &mut TimerEngine<C, S>) {
        engine.reset();
        self.start_latch.release();
        self.stop_latch.release();
        self.started_by_gesture = false;
    }
}
