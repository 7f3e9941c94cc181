//! Session bookkeeping
//!
//! Remaining time is always derived from timestamps, never counted down:
//!
//! ```text
//! remaining = phase_duration - (now - phase_started_at - phase_paused)
//! ```
//!
//! clamped to `[0, phase_duration]`, with `now` frozen at `paused_at`
//! while paused. Pause time is tracked both per phase (for the countdown)
//! and per session (for overall progress and the completed total).

use cadence_api::Phase;
use cadence_util::{MonotonicInstant, SessionId};
use chrono::{DateTime, Local};
use std::time::Duration;

/// State of one started session
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub session_id: SessionId,

    /// Current phase
    pub phase: Phase,

    /// Current item; meaningful only while Active or Resting
    pub item_index: usize,

    /// Configured duration of the current phase
    pub phase_duration: Duration,

    /// When the current phase began
    pub phase_started_at: MonotonicInstant,

    /// Pause time accumulated inside the current phase (finished pauses only)
    pub phase_paused: Duration,

    /// Set while paused
    pub paused_at: Option<MonotonicInstant>,

    /// Wall-clock start time (for display)
    pub started_at: DateTime<Local>,

    /// Monotonic start time
    pub started_at_mono: MonotonicInstant,

    /// Pause time accumulated across all phases (finished pauses only)
    pub total_paused: Duration,

    /// Set once the session reaches Completed
    pub completed_at: Option<MonotonicInstant>,

    /// Items whose active phase has ended
    pub items_completed: usize,
}

impl ActiveSession {
    /// Create a session that has not entered any phase yet
    pub fn new(now: DateTime<Local>, now_mono: MonotonicInstant) -> Self {
        Self {
            session_id: SessionId::new(),
            phase: Phase::Idle,
            item_index: 0,
            phase_duration: Duration::ZERO,
            phase_started_at: now_mono,
            phase_paused: Duration::ZERO,
            paused_at: None,
            started_at: now,
            started_at_mono: now_mono,
            total_paused: Duration::ZERO,
            completed_at: None,
            items_completed: 0,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// The instant time computations are evaluated at: frozen once
    /// completed or while paused.
    fn reference_time(&self, now: MonotonicInstant) -> MonotonicInstant {
        self.completed_at.or(self.paused_at).unwrap_or(now)
    }

    /// Unpaused time spent in the current phase
    pub fn phase_elapsed(&self, now: MonotonicInstant) -> Duration {
        self.reference_time(now)
            .saturating_duration_since(self.phase_started_at)
            .saturating_sub(self.phase_paused)
    }

    /// Get time remaining in the current phase
    pub fn time_remaining(&self, now: MonotonicInstant) -> Duration {
        if !self.phase.is_running() {
            return Duration::ZERO;
        }
        self.phase_duration.saturating_sub(self.phase_elapsed(now))
    }

    /// Instant at which the current phase runs out, assuming no further
    /// pauses. None if it lies beyond what the clock can represent.
    pub fn phase_deadline(&self) -> Option<MonotonicInstant> {
        self.phase_started_at
            .checked_add(self.phase_duration.saturating_add(self.phase_paused))
    }

    /// Unpaused time since the session started
    pub fn active_elapsed(&self, now: MonotonicInstant) -> Duration {
        self.reference_time(now)
            .saturating_duration_since(self.started_at_mono)
            .saturating_sub(self.total_paused)
    }

    /// Freeze the countdown. Returns false if not in a running phase or
    /// already paused.
    pub fn pause(&mut self, now: MonotonicInstant) -> bool {
        if !self.phase.is_running() || self.is_paused() {
            return false;
        }
        self.paused_at = Some(now);
        true
    }

    /// Unfreeze the countdown. Returns how long the pause lasted, or None
    /// if not paused.
    pub fn resume(&mut self, now: MonotonicInstant) -> Option<Duration> {
        let paused_at = self.paused_at.take()?;
        let paused_for = now.saturating_duration_since(paused_at);
        self.phase_paused += paused_for;
        self.total_paused += paused_for;
        Some(paused_for)
    }

    /// Switch to a new phase starting at `at`.
    ///
    /// A pause in progress carries over into the new phase; the part of it
    /// before `at` is folded into the session total.
    pub fn enter_phase(
        &mut self,
        phase: Phase,
        item_index: usize,
        duration: Duration,
        at: MonotonicInstant,
    ) {
        if let Some(paused_at) = self.paused_at {
            self.total_paused += at.saturating_duration_since(paused_at);
            self.paused_at = Some(at);
        }

        self.phase = phase;
        self.item_index = item_index;
        self.phase_duration = duration;
        self.phase_started_at = at;
        self.phase_paused = Duration::ZERO;

        if phase == Phase::Completed {
            self.paused_at = None;
            self.completed_at = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_util::{Clock, ManualClock};

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn session_in(phase: Phase, duration: Duration, clock: &ManualClock) -> ActiveSession {
        let mut session = ActiveSession::new(Local::now(), clock.now());
        session.enter_phase(phase, 0, duration, clock.now());
        session
    }

    #[test]
    fn test_time_remaining_counts_down() {
        let clock = ManualClock::new();
        let session = session_in(Phase::Active, secs(30), &clock);

        assert_eq!(session.time_remaining(clock.now()), secs(30));
        clock.advance(secs(12));
        assert_eq!(session.time_remaining(clock.now()), secs(18));
        clock.advance(secs(100));
        assert_eq!(session.time_remaining(clock.now()), Duration::ZERO);
    }

    #[test]
    fn test_pause_freezes_remaining() {
        let clock = ManualClock::new();
        let mut session = session_in(Phase::Active, secs(30), &clock);

        clock.advance(secs(10));
        assert!(session.pause(clock.now()));
        assert!(!session.pause(clock.now()));

        clock.advance(secs(60));
        assert_eq!(session.time_remaining(clock.now()), secs(20));

        assert_eq!(session.resume(clock.now()), Some(secs(60)));
        assert_eq!(session.time_remaining(clock.now()), secs(20));
        assert_eq!(session.resume(clock.now()), None);

        clock.advance(secs(5));
        assert_eq!(session.time_remaining(clock.now()), secs(15));
        assert_eq!(session.active_elapsed(clock.now()), secs(15));
    }

    #[test]
    fn test_deadline_accounts_for_pauses() {
        let clock = ManualClock::new();
        let start = clock.now();
        let mut session = session_in(Phase::Resting, secs(10), &clock);

        clock.advance(secs(2));
        session.pause(clock.now());
        clock.advance(secs(3));
        session.resume(clock.now());

        assert_eq!(session.phase_deadline(), start.checked_add(secs(13)));
    }

    #[test]
    fn test_enter_phase_while_paused_carries_pause() {
        let clock = ManualClock::new();
        let mut session = session_in(Phase::Preparing, secs(10), &clock);

        clock.advance(secs(4));
        session.pause(clock.now());
        clock.advance(secs(6));
        session.enter_phase(Phase::Active, 0, secs(30), clock.now());

        assert!(session.is_paused());
        assert_eq!(session.total_paused, secs(6));
        clock.advance(secs(20));
        assert_eq!(session.time_remaining(clock.now()), secs(30));

        session.resume(clock.now());
        assert_eq!(session.total_paused, secs(26));
        assert_eq!(session.active_elapsed(clock.now()), secs(4));
    }

    #[test]
    fn test_completed_freezes_elapsed() {
        let clock = ManualClock::new();
        let mut session = session_in(Phase::Active, secs(5), &clock);

        clock.advance(secs(5));
        session.enter_phase(Phase::Completed, 0, Duration::ZERO, clock.now());
        clock.advance(secs(50));

        assert_eq!(session.active_elapsed(clock.now()), secs(5));
        assert_eq!(session.time_remaining(clock.now()), Duration::ZERO);
        assert!(!session.pause(clock.now()));
    }
}
