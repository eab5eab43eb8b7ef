//! Countdown and stopwatch state machine
//!
//! State transitions:
//! - Idle / Stopped → CountingDown: `start_countdown`
//! - CountingDown → Running: third countdown tick
//! - CountingDown → Idle: `cancel_countdown`
//! - Running → Stopped: `stop_stopwatch`
//! - any → Idle: `reset`
//!
//! Invalid calls are no-ops. Ticks arrive as schedule handles through
//! [`TimerEngine::on_tick`] and are dropped unless they belong to the
//! schedule the current state created.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    services::{Clock, ScheduleHandle, Scheduler, TimerKind},
    state::{timer_state::COUNTDOWN_SECONDS, DisplayState, TimerMode, TimerState},
};

/// Interval between countdown ticks
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

/// Default interval between stopwatch refreshes
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Engine behaviour switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Interval at which a running stopwatch republishes its elapsed time
    pub tick_interval: Duration,
    /// Whether a stop → start without reset continues from the frozen elapsed time
    pub resumable: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            resumable: true,
        }
    }
}

/// Countdown and stopwatch engine over a clock and a scheduler
#[derive(Debug)]
pub struct TimerEngine<C, S> {
    config: EngineConfig,
    clock: C,
    scheduler: S,
    state: TimerState,
    /// Live countdown schedule, only while CountingDown
    countdown: Option<ScheduleHandle>,
    /// Live stopwatch schedule, only while Running
    stopwatch: Option<ScheduleHandle>,
    /// Elapsed time a resumed stopwatch continues from
    carried: Duration,
    torn_down: bool,
}

impl<C: Clock, S: Scheduler> TimerEngine<C, S> {
    pub fn new(config: EngineConfig, clock: C, scheduler: S) -> Self {
        Self {
            config,
            clock,
            scheduler,
            state: TimerState::Idle,
            countdown: None,
            stopwatch: None,
            carried: Duration::ZERO,
            torn_down: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.state.mode()
    }

    /// Current snapshot for rendering
    pub fn display_state(&self) -> DisplayState {
        self.state.display()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Begin the 3-second countdown from Idle or Stopped
    pub fn start_countdown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        match self.state {
            TimerState::Idle | TimerState::Stopped { .. } => {}
            other => {
                debug!("Ignoring countdown start while {}", other.mode());
                return false;
            }
        }

        self.release_schedules();
        self.countdown = Some(self.scheduler.schedule(TimerKind::Countdown, COUNTDOWN_INTERVAL));
        self.state = TimerState::CountingDown {
            remaining: COUNTDOWN_SECONDS,
            started_at: self.clock.now(),
        };

        info!("Countdown started from {}", COUNTDOWN_SECONDS);
        true
    }

    /// Abandon a countdown in progress and return to Idle
    pub fn cancel_countdown(&mut self) -> bool {
        if self.torn_down || !self.state.is_counting_down() {
            return false;
        }

        self.release_countdown();
        self.carried = Duration::ZERO;
        self.state = TimerState::Idle;

        info!("Countdown cancelled");
        true
    }

    /// Start the stopwatch immediately, skipping any countdown in progress
    pub fn start_stopwatch(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        if self.state.is_running() {
            debug!("Ignoring stopwatch start while already running");
            return false;
        }

        self.release_countdown();
        self.begin_stopwatch();
        true
    }

    /// Freeze the running stopwatch
    pub fn stop_stopwatch(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let TimerState::Running { elapsed, started_at } = self.state else {
            debug!("Ignoring stopwatch stop while {}", self.state.mode());
            return false;
        };

        self.release_stopwatch();
        let final_elapsed = elapsed.max(self.clock.now().saturating_duration_since(started_at));
        self.carried = if self.config.resumable { final_elapsed } else { Duration::ZERO };
        self.state = TimerState::Stopped { final_elapsed };

        info!("Stopwatch stopped at {:?}", final_elapsed);
        true
    }

    /// Cancel everything and return to Idle with zero elapsed time
    pub fn reset(&mut self) {
        if self.torn_down {
            return;
        }

        self.release_schedules();
        self.carried = Duration::ZERO;
        self.state = TimerState::Idle;

        info!("Timer reset");
    }

    /// Apply one tick; returns false for ticks whose schedule is no longer live
    pub fn on_tick(&mut self, handle: ScheduleHandle) -> bool {
        if self.torn_down {
            debug!("Ignoring tick {} after teardown", handle);
            return false;
        }

        if self.countdown == Some(handle) {
            self.countdown_tick()
        } else if self.stopwatch == Some(handle) {
            self.stopwatch_tick()
        } else {
            debug!("Ignoring stale tick {}", handle);
            false
        }
    }

    /// Release every outstanding schedule; all later calls and ticks are no-ops
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }

        self.release_schedules();
        self.torn_down = true;

        info!("Timer engine torn down while {}", self.state.mode());
    }

    fn countdown_tick(&mut self) -> bool {
        let TimerState::CountingDown { remaining, started_at } = self.state else {
            warn!("Countdown schedule outlived its state, releasing it");
            self.release_countdown();
            return false;
        };

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            // hand over to the stopwatch inside the same tick
            self.release_countdown();
            self.begin_stopwatch();
        } else {
            debug!("Countdown at {}", remaining);
            self.state = TimerState::CountingDown { remaining, started_at };
        }
        true
    }

    fn stopwatch_tick(&mut self) -> bool {
        let TimerState::Running { elapsed, started_at } = self.state else {
            warn!("Stopwatch schedule outlived its state, releasing it");
            self.release_stopwatch();
            return false;
        };

        let measured = self.clock.now().saturating_duration_since(started_at);
        self.state = TimerState::Running {
            elapsed: elapsed.max(measured),
            started_at,
        };
        true
    }

    fn begin_stopwatch(&mut self) {
        let carried = if self.config.resumable { self.carried } else { Duration::ZERO };
        let now = self.clock.now();
        let started_at = match now.checked_sub(carried) {
            Some(started_at) => started_at,
            None => {
                warn!("Clock reading too early to carry {:?}, starting from zero", carried);
                now
            }
        };
        let elapsed = now.saturating_duration_since(started_at);

        self.release_stopwatch();
        self.stopwatch = Some(self.scheduler.schedule(TimerKind::Stopwatch, self.config.tick_interval));
        self.state = TimerState::Running { elapsed, started_at };

        info!("Stopwatch running from {:?}", elapsed);
    }

    fn release_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn release_stopwatch(&mut self) {
        if let Some(handle) = self.stopwatch.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn release_schedules(&mut self) {
        self.release_countdown();
        self.release_stopwatch();
    }
}
