//! Monotonic clock sources

use tokio::time::Instant;

/// Supplies monotonic timestamps on demand
pub trait Clock {
    /// Current reading of the clock
    fn now(&self) -> Instant;
}

/// Live clock backed by tokio's `Instant`, so a paused test runtime controls it too
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
