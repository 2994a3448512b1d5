//! Configuration validation.

use crate::schema::HarvConfig;
use harv_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HarvConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(&mut errors, "popup.width", config.popup.width, 50.0, 1000.0);
    validate_range(
        &mut errors,
        "popup.height",
        config.popup.height,
        50.0,
        1000.0,
    );
    validate_range(&mut errors, "popup.margin", config.popup.margin, 0.0, 100.0);

    if config.service.endpoint.trim().is_empty() {
        errors.push("service.endpoint must not be empty".into());
    }
    if config.service.timeout_secs == 0 {
        errors.push("service.timeout_secs must be at least 1".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range(errors: &mut Vec<String>, field: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{field} must be between {min} and {max}, got {value}"));
    }
}
