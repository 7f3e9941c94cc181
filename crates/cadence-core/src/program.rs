//! Phase programs

use cadence_api::{ActivityItem, Phase};
use std::time::Duration;
use thiserror::Error;

/// Program construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error("Program has no items")]
    Empty,
}

/// Immutable description of a session: the ordered items and the fixed
/// duration of each kind of phase.
///
/// Every item gets `item_duration`; a rest of `rest_duration` sits between
/// consecutive items (never after the last one).
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseProgram<I = ActivityItem> {
    items: Vec<I>,
    prep_duration: Duration,
    item_duration: Duration,
    rest_duration: Duration,
}

impl<I> PhaseProgram<I> {
    /// Build a program. An empty item list is accepted; starting such a
    /// program completes immediately.
    pub fn new(
        items: Vec<I>,
        prep_duration: Duration,
        item_duration: Duration,
        rest_duration: Duration,
    ) -> Self {
        Self {
            items,
            prep_duration,
            item_duration,
            rest_duration,
        }
    }

    /// Build a program, rejecting an empty item list
    pub fn try_new(
        items: Vec<I>,
        prep_duration: Duration,
        item_duration: Duration,
        rest_duration: Duration,
    ) -> Result<Self, ProgramError> {
        if items.is_empty() {
            return Err(ProgramError::Empty);
        }
        Ok(Self::new(items, prep_duration, item_duration, rest_duration))
    }

    /// Same program with a different preparation duration
    pub fn with_prep_duration(self, prep_duration: Duration) -> Self {
        Self {
            prep_duration,
            ..self
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&I> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn prep_duration(&self) -> Duration {
        self.prep_duration
    }

    pub fn item_duration(&self) -> Duration {
        self.item_duration
    }

    pub fn rest_duration(&self) -> Duration {
        self.rest_duration
    }

    /// Configured duration of a phase. Idle and Completed have none.
    pub fn phase_duration(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Preparing => self.prep_duration,
            Phase::Active => self.item_duration,
            Phase::Resting => self.rest_duration,
            Phase::Idle | Phase::Completed => Duration::ZERO,
        }
    }

    /// `prep + N * item + (N - 1) * rest`, or zero for an empty program
    pub fn total_duration(&self) -> Duration {
        let count = self.item_count();
        if count == 0 {
            return Duration::ZERO;
        }
        let items = u32::try_from(count).unwrap_or(u32::MAX);
        self.prep_duration
            .saturating_add(self.item_duration.saturating_mul(items))
            .saturating_add(self.rest_duration.saturating_mul(items - 1))
    }
}
