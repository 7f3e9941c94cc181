//! Command types accepted by a running session

use serde::{Deserialize, Serialize};

/// All commands a host can issue to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Start a fresh session (from idle or completed)
    Start,

    /// Freeze the countdown
    Pause,

    /// Continue a paused countdown
    Resume,

    /// Abandon the session and return to idle
    Stop,

    /// End the preparation countdown early
    SkipPrep,

    /// End the current rest early
    SkipRest,

    /// Skip whichever of preparation or rest is current
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_serialization() {
        let json = serde_json::to_string(&Command::SkipRest).unwrap();
        assert_eq!(json, r#"{"type":"skip_rest"}"#);

        let parsed: Command = serde_json::from_str(r#"{"type":"pause"}"#).unwrap();
        assert_eq!(parsed, Command::Pause);
    }
}
