//! Phase programs and the session state machine for cadence
//!
//! This crate is the heart of cadence, containing:
//! - Phase programs (ordered items plus prep/item/rest durations)
//! - Session state machine (Idle -> Preparing -> Active -> Resting -> ... -> Completed)
//! - Pause bookkeeping that keeps countdowns free of drift
//! - Progress reporting for UI animation
//!
//! The engine does no I/O and owns no timers: the host ticks it and it
//! reads time through an injected [`cadence_util::Clock`].

mod engine;
mod events;
mod program;
mod session;

pub use engine::*;
pub use events::*;
pub use program::*;
pub use session::*;
