//! Raw program file schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw program file as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Runner settings
    #[serde(default)]
    pub runner: RawRunnerConfig,

    /// Phase durations
    pub program: RawProgram,

    /// Items worked through in order
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// Runner-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRunnerConfig {
    /// Tick cadence in milliseconds (default: 100)
    pub tick_interval_ms: Option<u64>,
}

/// Program durations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawProgram {
    /// Display name
    pub name: Option<String>,

    /// Countdown before the first item (default: 10)
    pub prep_seconds: Option<u64>,

    /// Time spent on each item
    pub item_seconds: u64,

    /// Break between items (default: 10)
    pub rest_seconds: Option<u64>,
}

/// Raw item definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawItem {
    /// Unique stable ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Icon reference (opaque, interpreted by the host)
    pub icon: Option<String>,
}
