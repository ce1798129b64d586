//! Settings file loading and validation.

use crate::error::ConfigError;
use crate::types::Settings;
use std::path::Path;

/// Name of the settings file looked up in the project directory.
pub const CONFIG_FILE: &str = "gsapi.toml";

/// Loads settings from `<project_dir>/gsapi.toml`.
///
/// The file is optional: if it does not exist, default settings are returned.
pub fn load_settings(project_dir: &Path) -> Result<Settings, ConfigError> {
    let path = project_dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(Settings::default());
    }
    load_settings_file(&path)
}

/// Loads settings from an explicit file path. The file must exist.
pub fn load_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_settings_from_str(&content)
}

/// Parses and validates settings from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_settings_from_str(content: &str) -> Result<Settings, ConfigError> {
    let settings: Settings =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_settings(&settings)?;
    Ok(settings)
}

fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    let base_url = settings.docs.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "docs.base_url must not be empty".to_string(),
        ));
    }
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "docs.base_url must be an http(s) URL, got '{base_url}'"
        )));
    }
    if settings.docs.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "docs.timeout_secs must be at least 1".to_string(),
        ));
    }
    let threshold = settings.lint.similarity_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::ValidationError(format!(
            "lint.similarity_threshold must be within 0..=1, got {threshold}"
        )));
    }
    if settings.lint.max_suggestions == 0 {
        return Err(ConfigError::ValidationError(
            "lint.max_suggestions must be at least 1".to_string(),
        ));
    }
    Ok(())
}
