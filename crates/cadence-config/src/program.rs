//! Validated program file

use crate::schema::{RawConfig, RawItem, RawRunnerConfig};
use cadence_api::ActivityItem;
use cadence_core::PhaseProgram;
use std::time::Duration;

/// Default tick cadence
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Preparation countdown used when the file does not set one
pub const DEFAULT_PREP_SECONDS: u64 = 10;

/// Rest between items used when the file does not set one
pub const DEFAULT_REST_SECONDS: u64 = 10;

/// Validated program file, ready to drive an engine
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Display name, if any
    pub name: Option<String>,

    /// The program itself
    pub program: PhaseProgram<ActivityItem>,

    /// Runner settings
    pub runner: RunnerConfig,
}

impl ProgramConfig {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let items = raw.items.into_iter().map(convert_item).collect();

        let program = PhaseProgram::new(
            items,
            Duration::from_secs(raw.program.prep_seconds.unwrap_or(DEFAULT_PREP_SECONDS)),
            Duration::from_secs(raw.program.item_seconds),
            Duration::from_secs(raw.program.rest_seconds.unwrap_or(DEFAULT_REST_SECONDS)),
        );

        Self {
            name: raw.program.name,
            program,
            runner: RunnerConfig::from_raw(raw.runner),
        }
    }

    /// Name to show for this program
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled program")
    }
}

/// Runner settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub tick_interval: Duration,
}

impl RunnerConfig {
    fn from_raw(raw: RawRunnerConfig) -> Self {
        Self {
            tick_interval: raw
                .tick_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TICK_INTERVAL),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

fn convert_item(raw: RawItem) -> ActivityItem {
    let item = ActivityItem::new(raw.id, raw.name);
    match raw.icon {
        Some(icon) => item.with_icon(icon),
        None => item,
    }
}
