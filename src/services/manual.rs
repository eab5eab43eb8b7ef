//! Hand-driven clock and scheduler for deterministic runs
//!
//! `ManualClock` only moves when told to. `ManualScheduler` keeps its
//! schedules against that clock and fires them in due order from
//! [`ManualScheduler::advance`]; the caller hands each fired tick to the
//! timer owner before the next one is considered, so a tick that cancels or
//! creates schedules is honoured immediately.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio::time::Instant;

use super::{
    clock::Clock,
    scheduler::{ScheduleHandle, Scheduler, TimerKind},
};

/// Clock that reports `origin + offset`, with the offset set by hand
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Time elapsed since the clock was created
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move the clock forward to `offset`; earlier offsets are ignored
    pub fn set(&self, offset: Duration) {
        let mut current = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        if offset > *current {
            *current = offset;
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *current += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

#[derive(Debug)]
struct Entry {
    handle: ScheduleHandle,
    interval: Duration,
    due: Duration,
}

#[derive(Debug, Default)]
struct ManualSchedule {
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
    created: usize,
}

/// Scheduler whose ticks fire only from [`ManualScheduler::advance`]
///
/// Clones share the same schedule table, so a test can keep one clone while
/// the timer engine owns another.
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    clock: ManualClock,
    inner: Arc<Mutex<ManualSchedule>>,
}

impl ManualScheduler {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            inner: Arc::new(Mutex::new(ManualSchedule::default())),
        }
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Total schedules ever created
    pub fn created(&self) -> usize {
        self.lock().created
    }

    pub fn is_scheduled(&self, handle: ScheduleHandle) -> bool {
        self.lock().entries.contains_key(&handle.id())
    }

    /// Handles of every outstanding schedule, oldest first
    pub fn handles(&self) -> Vec<ScheduleHandle> {
        self.lock().entries.values().map(|entry| entry.handle).collect()
    }

    /// Pop the earliest tick due at or before `deadline`, moving the clock to it
    pub fn next_tick(&self, deadline: Duration) -> Option<ScheduleHandle> {
        let mut inner = self.lock();
        let entry = inner
            .entries
            .values_mut()
            .filter(|entry| entry.due <= deadline)
            .min_by_key(|entry| (entry.due, entry.handle.id()))?;

        let due = entry.due;
        entry.due += entry.interval;
        let handle = entry.handle;
        drop(inner);

        self.clock.set(due);
        Some(handle)
    }

    /// Advance the clock by `by`, passing every tick that falls due to `on_tick`
    pub fn advance<F>(&self, by: Duration, mut on_tick: F)
    where
        F: FnMut(ScheduleHandle),
    {
        let deadline = self.clock.elapsed() + by;
        while let Some(handle) = self.next_tick(deadline) {
            on_tick(handle);
        }
        self.clock.set(deadline);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualSchedule> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, kind: TimerKind, interval: Duration) -> ScheduleHandle {
        let due = self.clock.elapsed() + interval;
        let mut inner = self.lock();
        inner.next_id += 1;
        inner.created += 1;
        let handle = ScheduleHandle::new(inner.next_id, kind);
        inner.entries.insert(handle.id(), Entry { handle, interval, due });
        handle
    }

    fn cancel(&mut self, handle: ScheduleHandle) {
        self.lock().entries.remove(&handle.id());
    }

    fn outstanding(&self) -> usize {
        self.lock().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn clock_only_moves_forward() {
        let clock = ManualClock::new();
        let start = clock.now();
        clock.set(ms(300));
        clock.set(ms(100));
        assert_eq!(clock.elapsed(), ms(300));
        clock.advance(ms(50));
        assert_eq!(clock.now() - start, ms(350));
    }

    #[test]
    fn ticks_fire_in_due_order() {
        let clock = ManualClock::new();
        let mut scheduler = ManualScheduler::new(clock.clone());
        let slow = scheduler.schedule(TimerKind::Countdown, ms(100));
        let fast = scheduler.schedule(TimerKind::Stopwatch, ms(40));

        let mut fired = Vec::new();
        scheduler.advance(ms(200), |handle| fired.push((handle, clock.elapsed())));

        assert_eq!(
            fired,
            vec![
                (fast, ms(40)),
                (fast, ms(80)),
                (slow, ms(100)),
                (fast, ms(120)),
                (fast, ms(160)),
                (slow, ms(200)),
                (fast, ms(200)),
            ]
        );
        assert_eq!(clock.elapsed(), ms(200));
    }

    #[test]
    fn cancelled_schedule_stops_firing() {
        let clock = ManualClock::new();
        let mut scheduler = ManualScheduler::new(clock);
        let handle = scheduler.schedule(TimerKind::Countdown, ms(100));
        let mut shared = scheduler.clone();

        let mut fired = 0;
        scheduler.advance(ms(1_000), |tick| {
            fired += 1;
            if fired == 2 {
                shared.cancel(tick);
            }
        });

        assert_eq!(fired, 2);
        assert!(!scheduler.is_scheduled(handle));
        assert_eq!(scheduler.outstanding(), 0);
        assert_eq!(scheduler.created(), 1);
    }
}
