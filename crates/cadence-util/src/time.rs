//! Time utilities for cadence
//!
//! Countdowns are computed from monotonic timestamps handed out by a
//! [`Clock`], never from tick counts. Wall-clock time (`now()`) is only
//! used for display and event envelopes.
//!
//! Two clocks are provided:
//! - [`SystemClock`]: the real monotonic clock
//! - [`ManualClock`]: a clock that only moves when `advance` is called,
//!   for tests and simulations

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Get the current local wall-clock time (display and logging only).
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Represents a point in monotonic time for countdown computation.
/// This is immune to wall-clock changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonotonicInstant(Instant);

impl MonotonicInstant {
    pub fn from_std(instant: Instant) -> Self {
        Self(instant)
    }

    pub fn into_std(self) -> Instant {
        self.0
    }

    /// Returns the duration since `earlier`, or zero if `earlier` is later.
    pub fn saturating_duration_since(&self, earlier: MonotonicInstant) -> Duration {
        self.0.saturating_duration_since(earlier.0)
    }

    /// `self + duration`, or None if that is not representable
    pub fn checked_add(&self, duration: Duration) -> Option<MonotonicInstant> {
        self.0.checked_add(duration).map(MonotonicInstant)
    }
}

/// Source of monotonic time.
///
/// The session engine reads time exclusively through this trait.
pub trait Clock {
    fn now(&self) -> MonotonicInstant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> MonotonicInstant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> MonotonicInstant {
        (**self).now()
    }
}

/// The real monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> MonotonicInstant {
        MonotonicInstant(Instant::now())
    }
}

/// A clock that stands still until advanced.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the engine.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset_nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.offset_nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Total time advanced since creation
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.offset_nanos.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> MonotonicInstant {
        MonotonicInstant(self.origin + self.elapsed())
    }
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Format a remaining time as a countdown display (`MM:SS`, or `H:MM:SS`).
///
/// Partial seconds round up, so a countdown shows `00:01` until it
/// actually reaches zero.
pub fn format_countdown(d: Duration) -> String {
    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs += 1;
    }
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
