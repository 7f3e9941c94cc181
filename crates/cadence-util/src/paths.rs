//! Default paths for cadence components
//!
//! The program file lives in the user's config directory:
//! `$XDG_CONFIG_HOME/cadence/program.toml` or `~/.config/cadence/program.toml`.

use std::path::PathBuf;

/// Environment variable for overriding the program file path
pub const CADENCE_CONFIG_ENV: &str = "CADENCE_CONFIG";

/// Program filename within the config directory
const PROGRAM_FILENAME: &str = "program.toml";

/// Application subdirectory name
const APP_DIR: &str = "cadence";

/// Get the default program file path.
///
/// Order of precedence:
/// 1. `$CADENCE_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/cadence/program.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/cadence/program.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CADENCE_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_dir().join(PROGRAM_FILENAME)
}

/// Get the cadence config directory, ignoring `$CADENCE_CONFIG`.
pub fn config_dir() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config").join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR)
}
