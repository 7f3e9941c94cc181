//! Shared utilities for cadence
//!
//! This crate provides:
//! - ID types (ItemId, SessionId)
//! - Clock sources (monotonic instants, real and manual clocks)
//! - Duration formatting helpers
//! - Default paths for the program file

mod ids;
mod paths;
mod time;

pub use ids::*;
pub use paths::*;
pub use time::*;
