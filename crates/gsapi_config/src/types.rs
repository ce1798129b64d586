//! Settings types deserialized from `gsapi.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// Default documentation base URL for the Game Script API.
pub const DEFAULT_DOCS_BASE: &str = "https://docs.openttd.org/gs-api";

/// Default upper bound on method name suggestions per diagnostic.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Default minimum similarity (0..=1) for a method name to be suggested.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// The top-level settings parsed from `gsapi.toml`.
///
/// Every section is optional; a missing file yields [`Settings::default`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Settings {
    /// Where documentation pages are fetched from.
    #[serde(default)]
    pub docs: DocsConfig,
    /// Cache location override.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Call validation settings.
    #[serde(default)]
    pub lint: LintConfig,
}

/// Documentation source settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DocsConfig {
    /// Base URL that class documentation page identifiers are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional request timeout in seconds. Requests never time out when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_DOCS_BASE.to_string()
}

/// Cache location settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Directory holding one JSON file per tracked class.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Call validation settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LintConfig {
    /// Rule names to suppress (e.g., `docs-unavailable`).
    #[serde(default)]
    pub allow: Vec<String>,
    /// Rule names to promote to error severity.
    #[serde(default)]
    pub deny: Vec<String>,
    /// Maximum number of method name suggestions attached to a diagnostic.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Minimum normalized similarity for a method name to be suggested.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            allow: Vec::new(),
            deny: Vec::new(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_settings_from_str;

    #[test]
    fn defaults_when_sections_missing() {
        let settings = load_settings_from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.docs.base_url, DEFAULT_DOCS_BASE);
        assert!(settings.docs.timeout_secs.is_none());
        assert!(settings.cache.dir.is_none());
        assert_eq!(settings.lint.max_suggestions, 3);
    }

    #[test]
    fn partial_lint_section_keeps_defaults() {
        let settings = load_settings_from_str("[lint]\nallow = [\"docs-unavailable\"]\n").unwrap();
        assert_eq!(settings.lint.allow, vec!["docs-unavailable"]);
        assert_eq!(settings.lint.similarity_threshold, DEFAULT_SIMILARITY_THRESHOLD);
    }
}
