//! Async runner for cadence sessions
//!
//! Provides:
//! - A tokio task that owns one session engine and ticks it
//! - Command channel into the engine
//! - Event broadcast and snapshot watch out of it
//! - A clock that follows tokio time (so tests can pause it)

mod clock;
mod runner;

pub use clock::*;
pub use runner::*;

use thiserror::Error;

/// Runner errors
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Runner has shut down")]
    Closed,

    #[error("Runner task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type RunnerResult<T> = Result<T, RunnerError>;
