//! Program file validation

use crate::schema::{RawConfig, RawItem};
use std::collections::HashSet;
use thiserror::Error;

/// Smallest accepted tick interval
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Largest accepted tick interval
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Item '{item_id}': {message}")]
    ItemError { item_id: String, message: String },

    #[error("Item #{index}: id cannot be empty")]
    EmptyItemId { index: usize },

    #[error("Duplicate item ID: {0}")]
    DuplicateItemId(String),

    #[error("tick_interval_ms = {0} is out of range (10..=1000)")]
    TickIntervalOutOfRange(u64),
}

/// Validate a raw program file, collecting every problem found
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(ms) = config.runner.tick_interval_ms
        && !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&ms)
    {
        errors.push(ValidationError::TickIntervalOutOfRange(ms));
    }

    let mut seen_ids = HashSet::new();
    for item in &config.items {
        if !item.id.is_empty() && !seen_ids.insert(&item.id) {
            errors.push(ValidationError::DuplicateItemId(item.id.clone()));
        }
    }

    for (index, item) in config.items.iter().enumerate() {
        errors.extend(validate_item(index, item));
    }

    errors
}

fn validate_item(index: usize, item: &RawItem) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if item.id.trim().is_empty() {
        errors.push(ValidationError::EmptyItemId { index });
        return errors;
    }

    if item.name.trim().is_empty() {
        errors.push(ValidationError::ItemError {
            item_id: item.id.clone(),
            message: "name cannot be empty".into(),
        });
    }

    if item.icon.as_deref().is_some_and(|icon| icon.trim().is_empty()) {
        errors.push(ValidationError::ItemError {
            item_id: item.id.clone(),
            message: "icon cannot be empty (omit it instead)".into(),
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RawProgram, RawRunnerConfig};

    fn item(id: &str, name: &str) -> RawItem {
        RawItem {
            id: id.into(),
            name: name.into(),
            icon: None,
        }
    }

    fn config(items: Vec<RawItem>) -> RawConfig {
        RawConfig {
            config_version: 1,
            runner: RawRunnerConfig::default(),
            program: RawProgram {
                name: None,
                prep_seconds: None,
                item_seconds: 30,
                rest_seconds: None,
            },
            items,
        }
    }

    #[test]
    fn test_valid_config() {
        let cfg = config(vec![item("squats", "Squats"), item("plank", "Plank")]);
        assert!(validate_config(&cfg).is_empty());
    }

    #[test]
    fn test_duplicate_ids() {
        let cfg = config(vec![
            item("squats", "Squats"),
            item("squats", "More squats"),
        ]);
        let errors = validate_config(&cfg);
        assert_eq!(errors, vec![ValidationError::DuplicateItemId("squats".into())]);
    }

    #[test]
    fn test_empty_fields_are_all_reported() {
        let mut cfg = config(vec![item("", "Nameless"), item("lunges", " ")]);
        cfg.runner.tick_interval_ms = Some(5);

        let errors = validate_config(&cfg);
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::TickIntervalOutOfRange(5)));
        assert!(errors.contains(&ValidationError::EmptyItemId { index: 0 }));
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ValidationError::ItemError { item_id, .. } if item_id == "lunges"))
        );
    }

    #[test]
    fn test_tick_interval_bounds() {
        let mut cfg = config(vec![item("a", "A")]);
        for ok in [10, 100, 1000] {
            cfg.runner.tick_interval_ms = Some(ok);
            assert!(validate_config(&cfg).is_empty(), "{ok} should be accepted");
        }
        cfg.runner.tick_interval_ms = Some(1001);
        assert_eq!(
            validate_config(&cfg),
            vec![ValidationError::TickIntervalOutOfRange(1001)]
        );
    }

    #[test]
    fn test_empty_item_list_is_valid() {
        assert!(validate_config(&config(Vec::new())).is_empty());
    }
}
