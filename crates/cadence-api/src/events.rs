//! Event types streamed from a session to its host

use cadence_util::SessionId;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{API_VERSION, Phase};

/// Event envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub api_version: u32,
    pub timestamp: DateTime<Local>,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            api_version: API_VERSION,
            timestamp: cadence_util::now(),
            payload,
        }
    }
}

/// All possible events from a session to its host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    /// A fresh session was started
    SessionStarted {
        session_id: SessionId,
        item_count: usize,
        total_duration: Duration,
    },

    /// A phase was entered. Emitted for every phase, including ones of
    /// zero length that are passed through immediately.
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

    /// All items were worked through. The host is expected to record the
    /// completed session from this event.
    SessionCompleted {
        session_id: SessionId,
        /// Unpaused time spent between start and completion
        total_active: Duration,
        items_completed: usize,
    },

    /// Session abandoned before completion (or cleared after it)
    SessionStopped {
        session_id: SessionId,
        phase: Phase,
        active_elapsed: Duration,
    },

    /// The runner is shutting down
    Shutdown,
}

impl EventPayload {
    pub fn session_id(&self) -> Option<&SessionId> {
        match self {
            EventPayload::SessionStarted { session_id, .. }
            | EventPayload::PhaseEntered { session_id, .. }
            | EventPayload::Paused { session_id, .. }
            | EventPayload::Resumed { session_id, .. }
            | EventPayload::SessionCompleted { session_id, .. }
            | EventPayload::SessionStopped { session_id, .. } => Some(session_id),
            EventPayload::Shutdown => None,
        }
    }
}
