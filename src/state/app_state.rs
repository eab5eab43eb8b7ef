//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{DisplayState, GestureObservation};
use crate::{
    engine::{Command, EngineConfig, GestureAction, GestureConfig, Stopwatch},
    services::{ScheduleHandle, Scheduler, SystemClock, TickSender, TokioScheduler},
};

/// Stopwatch running on the live clock and tokio schedules
pub type LiveStopwatch = Stopwatch<SystemClock, TokioScheduler>;

/// Everything needed to build a stopwatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwatchSettings {
    pub engine: EngineConfig,
    pub gestures: GestureConfig,
}

/// What the presentation layer renders for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub display: DisplayState,
    /// Gesture currently reported as active, if any
    pub active_gesture: Option<String>,
}

/// Main application state that owns the stopwatch and publishes its changes
#[derive(Debug)]
pub struct AppState {
    /// Live stopwatch; only the event loop mutates it
    stopwatch: Arc<Mutex<LiveStopwatch>>,
    pub settings: StopwatchSettings,
    /// Session metadata
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    active_gesture: Arc<Mutex<Option<String>>>,
    /// Channel for status updates
    pub status_tx: watch::Sender<StatusSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _status_rx: watch::Receiver<StatusSnapshot>,
}

impl AppState {
    /// Create a new AppState whose schedules deliver ticks to `tick_tx`
    pub fn new(settings: StopwatchSettings, tick_tx: TickSender) -> Self {
        let (status_tx, status_rx) = watch::channel(StatusSnapshot::default());
        let stopwatch = Stopwatch::new(
            settings.engine.clone(),
            settings.gestures.clone(),
            SystemClock,
            TokioScheduler::new(tick_tx),
        );

        Self {
            stopwatch: Arc::new(Mutex::new(stopwatch)),
            settings,
            start_time: Instant::now(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            active_gesture: Arc::new(Mutex::new(None)),
            status_tx,
            _status_rx: status_rx,
        }
    }

    /// Apply an update to the stopwatch and publish the resulting status
    fn update_stopwatch<T, F>(&self, action: Option<&str>, updater: F) -> Result<(T, DisplayState), String>
    where
        F: FnOnce(&mut LiveStopwatch) -> T,
    {
        let mut stopwatch = self.stopwatch.lock()
            .map_err(|e| format!("Failed to lock stopwatch: {}", e))?;

        let outcome = updater(&mut *stopwatch);
        let display = stopwatch.display_state();
        drop(stopwatch); // Release the lock early

        if let Some(action) = action {
            self.record_action(action)?;
        }

        self.publish(display)?;
        Ok((outcome, display))
    }

    /// Push the current status to watchers, skipping no-op updates
    fn publish(&self, display: DisplayState) -> Result<(), String> {
        let active_gesture = self.active_gesture.lock()
            .map_err(|e| format!("Failed to lock active gesture: {}", e))?
            .clone();
        let snapshot = StatusSnapshot { display, active_gesture };

        self.status_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
        Ok(())
    }

    /// Apply a manual command
    pub fn apply_command(&self, command: Command) -> Result<DisplayState, String> {
        info!("Manual command: {}", command);
        let (_, display) = self.update_stopwatch(Some(command.as_str()), |stopwatch| stopwatch.command(command))?;
        Ok(display)
    }

    /// Feed one frame's gesture observation
    pub fn observe_gesture(&self, observation: &GestureObservation) -> Result<DisplayState, String> {
        {
            let mut active = self.active_gesture.lock()
                .map_err(|e| format!("Failed to lock active gesture: {}", e))?;
            *active = observation.active.then(|| observation.name.clone());
        }

        let (action, display) = self.update_stopwatch(None, |stopwatch| stopwatch.observe(observation))?;
        match action {
            GestureAction::StartedCountdown => self.record_action("gesture-start")?,
            GestureAction::StoppedStopwatch => self.record_action("gesture-stop")?,
            GestureAction::None => {}
        }
        Ok(display)
    }

    /// Deliver one schedule tick
    pub fn on_tick(&self, handle: ScheduleHandle) -> Result<DisplayState, String> {
        let (applied, display) = self.update_stopwatch(None, |stopwatch| stopwatch.on_tick(handle))?;
        if !applied {
            debug!("Tick {} had no effect", handle);
        }
        Ok(display)
    }

    /// Release every schedule; the stopwatch ignores all input afterwards
    pub fn teardown(&self) -> Result<(), String> {
        self.update_stopwatch(Some("teardown"), |stopwatch| stopwatch.teardown())?;
        Ok(())
    }

    /// Get current display state
    pub fn get_display_state(&self) -> Result<DisplayState, String> {
        self.stopwatch.lock()
            .map(|stopwatch| stopwatch.display_state())
            .map_err(|e| format!("Failed to lock stopwatch: {}", e))
    }

    /// Number of schedules the live stopwatch still holds
    pub fn outstanding_schedules(&self) -> Result<usize, String> {
        self.stopwatch.lock()
            .map(|stopwatch| stopwatch.engine().scheduler().outstanding())
            .map_err(|e| format!("Failed to lock stopwatch: {}", e))
    }

    /// Latest published status
    pub fn status(&self) -> StatusSnapshot {
        self.status_tx.borrow().clone()
    }

    /// Subscribe to status changes
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.status_tx.subscribe()
    }

    /// Calculate session uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) -> Result<(), String> {
        *self.last_action.lock()
            .map_err(|e| format!("Failed to lock last action: {}", e))? = Some(action.to_string());
        *self.last_action_time.lock()
            .map_err(|e| format!("Failed to lock last action time: {}", e))? = Some(Utc::now());
        Ok(())
    }
}
