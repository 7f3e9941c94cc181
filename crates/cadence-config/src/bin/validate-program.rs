//! Program validation CLI tool
//!
//! Validates a cadence program file and reports any errors.

use cadence_util::{default_config_path, format_duration};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-program [program-file]");
            eprintln!();
            eprintln!("Validates a cadence program file.");
            eprintln!();
            eprintln!("Default location: {}", default_path.display());
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-program {}", default_path.display());
            eprintln!("  validate-program tabata.toml");
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Program file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match cadence_config::load_config(&config_path) {
        Ok(config) => {
            let program = &config.program;
            println!("✓ Program is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", cadence_config::CURRENT_CONFIG_VERSION);
            println!("  Name: {}", config.display_name());
            println!("  Prep: {}", format_duration(program.prep_duration()));
            println!("  Item: {}", format_duration(program.item_duration()));
            println!("  Rest: {}", format_duration(program.rest_duration()));
            println!("  Total: {}", format_duration(program.total_duration()));
            println!("  Tick: {}ms", config.runner.tick_interval.as_millis());
            println!("  Items: {}", program.item_count());

            if !program.is_empty() {
                println!();
                println!("Items:");
                for (i, item) in program.items().iter().enumerate() {
                    match &item.icon_ref {
                        Some(icon) => {
                            println!("  {}. {} [{}]: {}", i + 1, item.id, icon, item.name)
                        }
                        None => println!("  {}. {}: {}", i + 1, item.id, item.name),
                    }
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Program validation failed");
            eprintln!();
            match &e {
                cadence_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                cadence_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                cadence_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                cadence_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        cadence_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
