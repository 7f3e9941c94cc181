//! Public types shared between the cadence engine and its hosts
//!
//! This crate defines the stable surface consumed by UI, persistence and
//! notification collaborators:
//! - Phases, activity items and session snapshots
//! - Commands (host -> engine)
//! - Events (engine -> host)
//! - Versioning

mod commands;
mod events;
mod types;

pub use commands::*;
pub use events::*;
pub use types::*;

/// Current API version
pub const API_VERSION: u32 = 1;
