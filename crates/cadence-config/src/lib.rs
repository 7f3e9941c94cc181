//! Program file parsing and validation for cadence
//!
//! Supports TOML program files with:
//! - Versioned schema
//! - Item definitions with optional icons
//! - Prep, item and rest durations
//! - Runner tick settings
//! - Validation that reports every problem at once

mod program;
mod schema;
mod validation;

pub use program::*;
pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Program file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read program file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Load and validate a program file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<ProgramConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    info!(
        path = %path.display(),
        program = config.display_name(),
        items = config.program.item_count(),
        "Program loaded"
    );

    Ok(config)
}

/// Parse and validate a program from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<ProgramConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(ProgramConfig::from_raw(raw))
}
