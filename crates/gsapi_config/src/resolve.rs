//! Cache directory resolution: CLI override, environment, settings, default.

use crate::types::Settings;
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the cache directory.
pub const CACHE_DIR_ENV: &str = "GS_DOC_CACHE_DIR";

/// Directory name of the default per-user cache, created under the home directory.
const DEFAULT_CACHE_DIR_NAME: &str = ".openttd-gs-api-cache";

/// Where a resolved cache directory came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheDirSource {
    /// The `--cache-dir` command-line flag.
    CommandLine,
    /// The `GS_DOC_CACHE_DIR` environment variable.
    Environment,
    /// The `[cache] dir` setting.
    Settings,
    /// The per-user default location.
    Default,
}

/// A cache directory together with the source that selected it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCacheDir {
    /// The cache directory.
    pub path: PathBuf,
    /// Which configuration layer provided it.
    pub source: CacheDirSource,
}

/// Returns the default cache directory, `~/.openttd-gs-api-cache`.
///
/// Falls back to `$HOME`, then to the current directory, when the home
/// directory cannot be determined.
pub fn default_cache_dir() -> PathBuf {
    BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .or_else(|| std::env::var("HOME").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_CACHE_DIR_NAME)
}

/// Resolves the cache directory, reading `GS_DOC_CACHE_DIR` from the environment.
///
/// Precedence: command line, environment, settings file, default.
pub fn resolve_cache_dir(settings: &Settings, cli_override: Option<&Path>) -> ResolvedCacheDir {
    resolve_cache_dir_with(settings, cli_override, std::env::var(CACHE_DIR_ENV).ok())
}

/// Resolves the cache directory from explicit inputs.
///
/// Empty override values are ignored.
pub fn resolve_cache_dir_with(
    settings: &Settings,
    cli_override: Option<&Path>,
    env_value: Option<String>,
) -> ResolvedCacheDir {
    if let Some(path) = cli_override.filter(|p| !p.as_os_str().is_empty()) {
        return ResolvedCacheDir {
            path: path.to_path_buf(),
            source: CacheDirSource::CommandLine,
        };
    }
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return ResolvedCacheDir {
            path: PathBuf::from(value),
            source: CacheDirSource::Environment,
        };
    }
    if let Some(dir) = settings.cache.dir.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        return ResolvedCacheDir {
            path: dir.clone(),
            source: CacheDirSource::Settings,
        };
    }
    ResolvedCacheDir {
        path: default_cache_dir(),
        source: CacheDirSource::Default,
    }
}
