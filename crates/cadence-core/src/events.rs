//! Core events emitted by the engine

use cadence_api::{EventPayload, Phase};
use cadence_util::SessionId;
use std::time::Duration;

/// Events emitted by the session engine
#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    /// Fresh session started
    SessionStarted {
        session_id: SessionId,
        item_count: usize,
        total_duration: Duration,
    },

    /// Phase entered (zero-length phases included)
    PhaseEntered {
        session_id: SessionId,
        phase: Phase,
        item_index: Option<usize>,
        duration: Duration,
    },

    /// Countdown frozen
    Paused {
        session_id: SessionId,
        time_remaining: Duration,
    },

    /// Countdown continues
    Resumed {
        session_id: SessionId,
        time_remaining: Duration,
        paused_for: Duration,
    },

    /// Last item finished
    SessionCompleted {
        session_id: SessionId,
        total_active: Duration,
        items_completed: usize,
    },

    /// Session reset to idle
    SessionStopped {
        session_id: SessionId,
        phase: Phase,
        active_elapsed: Duration,
    },
}

impl From<CoreEvent> for EventPayload {
    fn from(event: CoreEvent) -> Self {
        match event {
            CoreEvent::SessionStarted {
                session_id,
                item_count,
                total_duration,
            } => EventPayload::SessionStarted {
                session_id,
                item_count,
                total_duration,
            },
            CoreEvent::PhaseEntered {
                session_id,
                phase,
                item_index,
                duration,
            } => EventPayload::PhaseEntered {
                session_id,
                phase,
                item_index,
                duration,
            },
            CoreEvent::Paused {
                session_id,
                time_remaining,
            } => EventPayload::Paused {
                session_id,
                time_remaining,
            },
            CoreEvent::Resumed {
                session_id,
                time_remaining,
                paused_for,
            } => EventPayload::Resumed {
                session_id,
                time_remaining,
                paused_for,
            },
            CoreEvent::SessionCompleted {
                session_id,
                total_active,
                items_completed,
            } => EventPayload::SessionCompleted {
                session_id,
                total_active,
                items_completed,
            },
            CoreEvent::SessionStopped {
                session_id,
                phase,
                active_elapsed,
            } => EventPayload::SessionStopped {
                session_id,
                phase,
                active_elapsed,
            },
        }
    }
}
