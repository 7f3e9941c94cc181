//! Session engine
//!
//! Walks a [`PhaseProgram`] through its phases:
//!
//! ```text
//! Idle --start--> Preparing --timeout/skip_prep--> Active(0)
//! Active(i) --timeout--> Resting(i)    (i + 1 < N)
//! Active(i) --timeout--> Completed     (i + 1 == N)
//! Resting(i) --timeout/skip_rest--> Active(i + 1)
//! any --stop--> Idle
//! Completed --start--> Preparing
//! ```
//!
//! The engine owns no timer. The host calls [`SessionEngine::tick`] at a
//! fixed cadence; each tick recomputes the remaining time from the clock.
//! A phase that runs out ends at its exact deadline, and the next phase
//! starts from that deadline, so a late tick never shifts the schedule.
//!
//! Commands that do not apply to the current state are ignored and
//! return no events.

use cadence_api::{ActivityItem, Command, Phase, SessionSnapshot};
use cadence_util::{Clock, MonotonicInstant, SessionId, SystemClock};
use std::time::Duration;
use tracing::{debug, info};

use crate::{ActiveSession, CoreEvent, PhaseProgram};

/// The session engine
#[derive(Debug)]
pub struct SessionEngine<I = ActivityItem, C = SystemClock> {
    program: PhaseProgram<I>,
    clock: C,
    session: Option<ActiveSession>,
}

impl<I, C: Clock> SessionEngine<I, C> {
    /// Create an idle engine for a program
    pub fn new(program: PhaseProgram<I>, clock: C) -> Self {
        info!(
            item_count = program.item_count(),
            total_duration_secs = program.total_duration().as_secs(),
            "Session engine initialized"
        );

        Self {
            program,
            clock,
            session: None,
        }
    }

    // Queries

    pub fn program(&self) -> &PhaseProgram<I> {
        &self.program
    }

    /// Get current session reference (None while idle)
    pub fn current_session(&self) -> Option<&ActiveSession> {
        self.session.as_ref()
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session.as_ref().map(|s| &s.session_id)
    }

    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Idle, |s| s.phase)
    }

    /// Current item index, only while Active or Resting
    pub fn item_index(&self) -> Option<usize> {
        self.session
            .as_ref()
            .filter(|s| s.phase.has_item())
            .map(|s| s.item_index)
    }

    pub fn current_item(&self) -> Option<&I> {
        self.item_index().and_then(|i| self.program.item(i))
    }

    pub fn is_paused(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_paused())
    }

    /// Whether ticking can change anything: a countdown is running and not
    /// paused.
    pub fn needs_tick(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.phase.is_running() && !s.is_paused())
    }

    pub fn time_remaining(&self) -> Duration {
        let now = self.clock.now();
        self.session
            .as_ref()
            .map_or(Duration::ZERO, |s| s.time_remaining(now))
    }

    /// Configured duration of the current phase
    pub fn phase_duration(&self) -> Duration {
        self.session
            .as_ref()
            .map_or(Duration::ZERO, |s| s.phase_duration)
    }

    /// Unpaused time since the session started, never more than the
    /// program's total (between ticks the last phase may be overdue).
    pub fn active_elapsed(&self) -> Duration {
        let now = self.clock.now();
        self.session
            .as_ref()
            .map_or(Duration::ZERO, |s| s.active_elapsed(now))
            .min(self.program.total_duration())
    }

    /// 0.0 ..= 1.0 progress within the current phase
    pub fn segment_progress(&self) -> f64 {
        self.segment_progress_at(self.clock.now())
    }

    /// 0.0 ..= 1.0 progress across the whole program
    pub fn overall_progress(&self) -> f64 {
        self.overall_progress_at(self.clock.now())
    }

    /// Build a full state snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        let now = self.clock.now();
        let item_count = self.program.item_count();

        let Some(session) = &self.session else {
            return SessionSnapshot::idle(item_count);
        };

        SessionSnapshot {
            session_id: Some(session.session_id.clone()),
            phase: session.phase,
            item_index: session.phase.has_item().then_some(session.item_index),
            item_count,
            time_remaining: session.time_remaining(now),
            phase_duration: session.phase_duration,
            is_paused: session.is_paused(),
            segment_progress: self.segment_progress_at(now),
            overall_progress: self.overall_progress_at(now),
            started_at: Some(session.started_at),
        }
    }

    fn segment_progress_at(&self, now: MonotonicInstant) -> f64 {
        let Some(session) = &self.session else {
            return 0.0;
        };
        if session.phase == Phase::Completed {
            return 1.0;
        }
        if !session.phase.is_running() || session.phase_duration.is_zero() {
            return 0.0;
        }
        let remaining = session.time_remaining(now).as_secs_f64();
        let total = session.phase_duration.as_secs_f64();
        (1.0 - remaining / total).clamp(0.0, 1.0)
    }

    fn overall_progress_at(&self, now: MonotonicInstant) -> f64 {
        let Some(session) = &self.session else {
            return 0.0;
        };
        if session.phase == Phase::Completed {
            return 1.0;
        }
        let total = self.program.total_duration();
        if total.is_zero() {
            return 0.0;
        }
        let elapsed = session.active_elapsed(now).as_secs_f64();
        (elapsed / total.as_secs_f64()).clamp(0.0, 1.0)
    }

    // Commands

    /// Start a fresh session. Only valid while Idle or Completed.
    pub fn start(&mut self) -> Vec<CoreEvent> {
        let mut events = Vec::new();

        let phase = self.phase();
        if phase != Phase::Idle && phase != Phase::Completed {
            debug!(phase = %phase, "Start ignored: session in progress");
            return events;
        }

        let now = self.clock.now();
        let session = ActiveSession::new(cadence_util::now(), now);
        let session_id = session.session_id.clone();
        self.session = Some(session);

        info!(
            session_id = %session_id,
            item_count = self.program.item_count(),
            total_duration_secs = self.program.total_duration().as_secs(),
            "Session started"
        );

        events.push(CoreEvent::SessionStarted {
            session_id,
            item_count: self.program.item_count(),
            total_duration: self.program.total_duration(),
        });

        if self.program.is_empty() {
            self.enter(Phase::Completed, 0, now, &mut events);
        } else {
            self.enter(Phase::Preparing, 0, now, &mut events);
            self.settle(now, &mut events);
        }

        events
    }

    /// Freeze the countdown. Only valid in a running, unpaused phase.
    pub fn pause(&mut self) -> Vec<CoreEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();
        self.settle(now, &mut events);

        let Some(session) = self.session.as_mut() else {
            debug!("Pause ignored: no session");
            return events;
        };

        if !session.pause(now) {
            debug!(
                phase = %session.phase,
                paused = session.is_paused(),
                "Pause ignored"
            );
            return events;
        }

        let time_remaining = session.time_remaining(now);
        debug!(
            session_id = %session.session_id,
            phase = %session.phase,
            remaining_ms = time_remaining.as_millis() as u64,
            "Session paused"
        );

        events.push(CoreEvent::Paused {
            session_id: session.session_id.clone(),
            time_remaining,
        });

        events
    }

    /// Continue a paused countdown
    pub fn resume(&mut self) -> Vec<CoreEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();

        let Some(session) = self.session.as_mut() else {
            debug!("Resume ignored: no session");
            return events;
        };

        let Some(paused_for) = session.resume(now) else {
            debug!(phase = %session.phase, "Resume ignored: not paused");
            return events;
        };

        let time_remaining = session.time_remaining(now);
        debug!(
            session_id = %session.session_id,
            phase = %session.phase,
            paused_ms = paused_for.as_millis() as u64,
            remaining_ms = time_remaining.as_millis() as u64,
            "Session resumed"
        );

        events.push(CoreEvent::Resumed {
            session_id: session.session_id.clone(),
            time_remaining,
            paused_for,
        });

        self.settle(now, &mut events);
        events
    }

    /// Reset to Idle, discarding the session. Transitions that were already
    /// due (including completion) are reported first.
    pub fn stop(&mut self) -> Vec<CoreEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();
        self.settle(now, &mut events);

        let Some(session) = self.session.take() else {
            debug!("Stop ignored: no session");
            return events;
        };

        let active_elapsed = session.active_elapsed(now);
        info!(
            session_id = %session.session_id,
            phase = %session.phase,
            active_secs = active_elapsed.as_secs(),
            "Session stopped"
        );

        events.push(CoreEvent::SessionStopped {
            session_id: session.session_id,
            phase: session.phase,
            active_elapsed,
        });
        events
    }

    /// End the preparation countdown now. Only valid while Preparing.
    pub fn skip_prep(&mut self) -> Vec<CoreEvent> {
        self.skip_where(|phase| phase == Phase::Preparing)
    }

    /// End the current rest now. Only valid while Resting.
    pub fn skip_rest(&mut self) -> Vec<CoreEvent> {
        self.skip_where(|phase| phase == Phase::Resting)
    }

    /// Skip whichever of preparation or rest is current
    pub fn skip(&mut self) -> Vec<CoreEvent> {
        self.skip_where(|phase| matches!(phase, Phase::Preparing | Phase::Resting))
    }

    /// Apply an API command
    pub fn handle_command(&mut self, command: Command) -> Vec<CoreEvent> {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Stop => self.stop(),
            Command::SkipPrep => self.skip_prep(),
            Command::SkipRest => self.skip_rest(),
            Command::Skip => self.skip(),
        }
    }

    /// Tick the engine: recompute the countdown and fire any transitions
    /// that are due.
    pub fn tick(&mut self) -> Vec<CoreEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();
        self.settle(now, &mut events);
        events
    }

    // Internal

    fn skip_where(&mut self, applies: impl Fn(Phase) -> bool) -> Vec<CoreEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();
        self.settle(now, &mut events);

        let phase = self.phase();
        if !applies(phase) {
            debug!(phase = %phase, "Skip ignored");
            return events;
        }

        debug!(phase = %phase, "Skipping phase");
        self.finish_phase(now, &mut events);
        self.settle(now, &mut events);
        events
    }

    /// Fire every timeout transition that is due at `now`. Each phase ends
    /// at its own deadline, so several phases can be crossed in one call;
    /// zero-length phases are passed through even while paused.
    fn settle(&mut self, now: MonotonicInstant, events: &mut Vec<CoreEvent>) {
        loop {
            let Some(session) = &self.session else {
                return;
            };
            if !session.phase.is_running() {
                return;
            }
            if session.is_paused() && !session.phase_duration.is_zero() {
                return;
            }
            if !session.time_remaining(now).is_zero() {
                return;
            }

            // Remaining time is zero, so the deadline is not after `now`
            let deadline = session.phase_deadline().unwrap_or(now);
            self.finish_phase(deadline, events);
        }
    }

    /// Leave the current phase at `at`, entering whatever follows it
    fn finish_phase(&mut self, at: MonotonicInstant, events: &mut Vec<CoreEvent>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let (phase, index) = (session.phase, session.item_index);
        if phase == Phase::Active {
            session.items_completed = index + 1;
        }

        match phase {
            Phase::Preparing => self.enter(Phase::Active, 0, at, events),
            Phase::Active => {
                if index + 1 < self.program.item_count() {
                    self.enter(Phase::Resting, index, at, events);
                } else {
                    self.enter(Phase::Completed, index, at, events);
                }
            }
            Phase::Resting => self.enter(Phase::Active, index + 1, at, events),
            Phase::Idle | Phase::Completed => {}
        }
    }

    fn enter(
        &mut self,
        phase: Phase,
        item_index: usize,
        at: MonotonicInstant,
        events: &mut Vec<CoreEvent>,
    ) {
        let duration = self.program.phase_duration(phase);
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.enter_phase(phase, item_index, duration, at);

        debug!(
            session_id = %session.session_id,
            phase = %phase,
            item_index,
            duration_ms = duration.as_millis() as u64,
            "Phase entered"
        );

        events.push(CoreEvent::PhaseEntered {
            session_id: session.session_id.clone(),
            phase,
            item_index: phase.has_item().then_some(item_index),
            duration,
        });

        if phase == Phase::Completed {
            let total_active = session.active_elapsed(at);
            info!(
                session_id = %session.session_id,
                items_completed = session.items_completed,
                active_secs = total_active.as_secs(),
                "Session completed"
            );

            events.push(CoreEvent::SessionCompleted {
                session_id: session.session_id.clone(),
                total_active,
                items_completed: session.items_completed,
            });
        }
    }
}
