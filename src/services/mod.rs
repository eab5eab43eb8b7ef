//! Time services module
//!
//! This module contains the clock sources and periodic schedulers the timer
//! engine runs against, in live and hand-driven variants.

pub mod clock;
#[cfg(test)]
pub mod manual;
pub mod scheduler;

// Re-export main types
pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use manual::{ManualClock, ManualScheduler};
pub use scheduler::{ScheduleHandle, Scheduler, TickReceiver, TickSender, TimerKind, TokioScheduler};
