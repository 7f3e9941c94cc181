//! Shared types for the cadence API

use cadence_util::{ItemId, SessionId};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Stage of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No session (never started, or stopped)
    #[default]
    Idle,
    /// Countdown before the first item
    Preparing,
    /// Working on an item
    Active,
    /// Break between two items
    Resting,
    /// Every item has been worked through
    Completed,
}

impl Phase {
    /// Whether this phase runs a countdown
    pub fn is_running(self) -> bool {
        matches!(self, Phase::Preparing | Phase::Active | Phase::Resting)
    }

    /// Whether the phase refers to an item index
    pub fn has_item(self) -> bool {
        matches!(self, Phase::Active | Phase::Resting)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Preparing => "preparing",
            Phase::Active => "active",
            Phase::Resting => "resting",
            Phase::Completed => "completed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of work sequenced by a program (an exercise, a focus block)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: ItemId,
    pub name: String,
    /// Icon reference (opaque, interpreted by the host)
    pub icon_ref: Option<String>,
}

impl ActivityItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon_ref: None,
        }
    }

    pub fn with_icon(mut self, icon_ref: impl Into<String>) -> Self {
        self.icon_ref = Some(icon_ref.into());
        self
    }
}

/// Point-in-time view of a session for UI display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Option<SessionId>,
    pub phase: Phase,
    /// Current item (Active/Resting only). While resting this is the item
    /// that was just finished.
    pub item_index: Option<usize>,
    pub item_count: usize,
    pub time_remaining: Duration,
    /// Configured duration of the current phase
    pub phase_duration: Duration,
    pub is_paused: bool,
    /// 0.0 ..= 1.0 within the current phase
    pub segment_progress: f64,
    /// 0.0 ..= 1.0 across the whole program
    pub overall_progress: f64,
    /// Wall-clock start of the session (display only)
    pub started_at: Option<DateTime<Local>>,
}

impl SessionSnapshot {
    /// Snapshot of an engine with no session
    pub fn idle(item_count: usize) -> Self {
        Self {
            session_id: None,
            phase: Phase::Idle,
            item_index: None,
            item_count,
            time_remaining: Duration::ZERO,
            phase_duration: Duration::ZERO,
            is_paused: false,
            segment_progress: 0.0,
            overall_progress: 0.0,
            started_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_classification() {
        assert!(!Phase::Idle.is_running());
        assert!(Phase::Preparing.is_running());
        assert!(Phase::Active.is_running());
        assert!(Phase::Resting.is_running());
        assert!(!Phase::Completed.is_running());

        assert!(Phase::Active.has_item());
        assert!(Phase::Resting.has_item());
        assert!(!Phase::Preparing.has_item());
    }

    #[test]
    fn phase_serializes_snake_case() {
        let json = serde_json::to_string(&Phase::Resting).unwrap();
        assert_eq!(json, "\"resting\"");
        assert_eq!(Phase::Preparing.to_string(), "preparing");
    }

    #[test]
    fn activity_item_builder() {
        let item = ActivityItem::new("burpees", "Burpees").with_icon("figure.burpee");
        assert_eq!(item.id.as_str(), "burpees");
        assert_eq!(item.icon_ref.as_deref(), Some("figure.burpee"));
    }

    #[test]
    fn idle_snapshot_has_no_countdown() {
        let snapshot = SessionSnapshot::idle(4);
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.item_count, 4);
        assert_eq!(snapshot.time_remaining, Duration::ZERO);
        assert!(snapshot.item_index.is_none());
    }
}
