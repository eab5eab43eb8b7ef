//! Cancellable periodic schedules
//!
//! A schedule is identified by a [`ScheduleHandle`]. The live implementation
//! delivers each tick as that handle over a channel; whoever owns the timer
//! state feeds it back in and decides whether the tick still applies.

use std::{collections::HashMap, fmt, time::Duration};
use serde::{Deserialize, Serialize};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Which logical timer a schedule drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    Countdown,
    Stopwatch,
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerKind::Countdown => write!(f, "countdown"),
            TimerKind::Stopwatch => write!(f, "stopwatch"),
        }
    }
}

/// Identifies one outstanding periodic schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleHandle {
    id: u64,
    kind: TimerKind,
}

impl ScheduleHandle {
    pub(crate) fn new(id: u64, kind: TimerKind) -> Self {
        Self { id, kind }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }
}

impl fmt::Display for ScheduleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// Creates and cancels repeating schedules
pub trait Scheduler {
    /// Start a schedule that ticks every `interval`, first tick one interval from now
    fn schedule(&mut self, kind: TimerKind, interval: Duration) -> ScheduleHandle;

    /// Release a schedule; unknown or already cancelled handles are ignored
    fn cancel(&mut self, handle: ScheduleHandle);

    /// Number of schedules not yet cancelled
    fn outstanding(&self) -> usize;
}

pub type TickSender = mpsc::UnboundedSender<ScheduleHandle>;
pub type TickReceiver = mpsc::UnboundedReceiver<ScheduleHandle>;

/// Scheduler that runs one tokio interval task per schedule
///
/// Must be used from inside a tokio runtime. Dropping it aborts every task it
/// spawned.
#[derive(Debug)]
pub struct TokioScheduler {
    tick_tx: TickSender,
    tasks: HashMap<u64, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    pub fn new(tick_tx: TickSender) -> Self {
        Self {
            tick_tx,
            tasks: HashMap::new(),
            next_id: 0,
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, kind: TimerKind, period: Duration) -> ScheduleHandle {
        self.next_id += 1;
        let handle = ScheduleHandle::new(self.next_id, kind);
        let tick_tx = self.tick_tx.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if tick_tx.send(handle).is_err() {
                    debug!("Tick receiver closed, ending schedule {}", handle);
                    break;
                }
            }
        });

        debug!("Scheduled {} every {:?}", handle, period);
        self.tasks.insert(handle.id, task);
        handle
    }

    fn cancel(&mut self, handle: ScheduleHandle) {
        if let Some(task) = self.tasks.remove(&handle.id) {
            task.abort();
            debug!("Cancelled schedule {}", handle);
        }
    }

    fn outstanding(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn delivers_ticks_until_cancelled() {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tick_tx);

        let handle = scheduler.schedule(TimerKind::Stopwatch, Duration::from_millis(50));
        assert_eq!(scheduler.outstanding(), 1);
        assert_eq!(tick_rx.recv().await, Some(handle));
        assert_eq!(tick_rx.recv().await, Some(handle));

        scheduler.cancel(handle);
        assert_eq!(scheduler.outstanding(), 0);

        sleep(Duration::from_millis(500)).await;
        assert!(tick_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_interval() {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tick_tx);
        let started = Instant::now();

        let handle = scheduler.schedule(TimerKind::Countdown, Duration::from_secs(1));
        assert_eq!(tick_rx.recv().await, Some(handle));
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn handles_are_unique() {
        let (tick_tx, _tick_rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tick_tx);

        let first = scheduler.schedule(TimerKind::Countdown, Duration::from_secs(1));
        let second = scheduler.schedule(TimerKind::Countdown, Duration::from_secs(1));
        assert_ne!(first, second);

        // cancelling twice is harmless
        scheduler.cancel(first);
        scheduler.cancel(first);
        assert_eq!(scheduler.outstanding(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_all_schedules() {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tick_tx);
        scheduler.schedule(TimerKind::Countdown, Duration::from_secs(1));
        scheduler.schedule(TimerKind::Stopwatch, Duration::from_millis(50));

        drop(scheduler);
        assert_eq!(tick_rx.recv().await, None);
    }
}
