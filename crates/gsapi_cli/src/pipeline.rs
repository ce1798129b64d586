//! Shared pipeline helpers for CLI commands.
//!
//! Contains the utilities used by `update`, `check`, and `show`: project
//! directory and settings resolution, cache location, script discovery, and
//! construction of the documentation maintainer.

use std::path::{Path, PathBuf};

use gsapi_cache::CacheStore;
use gsapi_config::{ResolvedCacheDir, Settings, CONFIG_FILE};
use gsapi_docs::{HttpDocSource, Maintainer};
use ignore::WalkBuilder;

use crate::GlobalArgs;

/// File extension of Game Script sources.
const SCRIPT_EXT: &str = "nut";

/// Settings and cache location shared by every command.
pub struct Session {
    /// The directory scripts are discovered in by default.
    pub project_dir: PathBuf,
    /// The loaded settings (defaults when no settings file exists).
    pub settings: Settings,
    /// Where the documentation cache lives and why.
    pub cache: ResolvedCacheDir,
}

impl Session {
    /// Returns a store over the resolved cache directory.
    pub fn store(&self) -> CacheStore {
        CacheStore::new(&self.cache.path)
    }

    /// Builds a maintainer that fetches from the configured documentation site.
    pub fn maintainer(&self) -> Result<Maintainer<HttpDocSource>, Box<dyn std::error::Error>> {
        let source = HttpDocSource::from_config(&self.settings.docs)?;
        Ok(Maintainer::new(source, self.store()))
    }
}

/// Walks up from `start` looking for the nearest directory containing `gsapi.toml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Loads settings and resolves the cache directory from global CLI args.
///
/// With `--config`, that file is loaded and its directory is the project
/// directory. Otherwise the nearest `gsapi.toml` above the current directory is
/// used; without one, defaults apply and the current directory is the project.
pub fn load_session(global: &GlobalArgs) -> Result<Session, Box<dyn std::error::Error>> {
    let (project_dir, settings) = match global.config {
        Some(ref config_path) => {
            let path = PathBuf::from(config_path);
            let settings = gsapi_config::load_settings_file(&path)?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (dir, settings)
        }
        None => {
            let cwd = std::env::current_dir()?;
            let dir = find_project_root(&cwd).unwrap_or(cwd);
            let settings = gsapi_config::load_settings(&dir)?;
            (dir, settings)
        }
    };

    let cache = gsapi_config::resolve_cache_dir(&settings, global.cache_dir.as_deref());
    tracing::debug!(
        project = %project_dir.display(),
        cache = %cache.path.display(),
        source = ?cache.source,
        "session resolved"
    );
    Ok(Session {
        project_dir,
        settings,
        cache,
    })
}

/// Discovers `.nut` scripts under the given paths.
///
/// Directories are searched recursively, skipping hidden entries and anything
/// excluded by `.gitignore` files, even outside a git checkout. Files
/// named explicitly are included whatever their extension. The result is
/// sorted and free of duplicates.
pub fn discover_scripts(paths: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk_dir(path, &mut files)?;
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(format!("no such file or directory: {}", path.display()).into());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let walker = WalkBuilder::new(dir)
        .hidden(true)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false)
        .build();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) && is_script(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(())
}

/// Returns `true` if `path` has the Game Script extension.
pub fn is_script(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SCRIPT_EXT)
}
