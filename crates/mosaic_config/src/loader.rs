//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::FloorplanConfig;
use std::path::Path;

/// Loads and validates a `mosaic.toml` configuration file.
pub fn load_config(path: &Path) -> Result<FloorplanConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<FloorplanConfig, ConfigError> {
    let config: FloorplanConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates required fields and numeric ranges.
fn validate_config(config: &FloorplanConfig) -> Result<(), ConfigError> {
    if config.files.blocks.is_empty() {
        return Err(ConfigError::MissingField("files.blocks".to_string()));
    }
    if config.files.nets.is_empty() {
        return Err(ConfigError::MissingField("files.nets".to_string()));
    }
    if config.anneal.temperature <= 0.0 {
        return Err(ConfigError::Validation(
            "anneal.temperature must be positive".to_string(),
        ));
    }
    if config.anneal.cooling <= 0.0 || config.anneal.cooling >= 1.0 {
        return Err(ConfigError::Validation(
            "anneal.cooling must be in (0, 1)".to_string(),
        ));
    }
    if config.anneal.iterations == 0 {
        return Err(ConfigError::Validation(
            "anneal.iterations must be positive".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&config.cost.area_weight) {
        return Err(ConfigError::Validation(
            "cost.area_weight must be in [0, 1]".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&config.cost.adjacency_weight) {
        return Err(ConfigError::Validation(
            "cost.adjacency_weight must be in [0, 1]".to_string(),
        ));
    }
    Ok(())
}
