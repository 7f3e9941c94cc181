//! Clock backed by tokio time

use cadence_util::{Clock, MonotonicInstant};

/// Reads `tokio::time::Instant`, so paused or advanced test time is seen by
/// the engine too.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> MonotonicInstant {
        MonotonicInstant::from_std(tokio::time::Instant::now().into_std())
    }
}
