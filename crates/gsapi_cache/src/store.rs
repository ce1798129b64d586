//! One-JSON-file-per-class cache store.

use std::path::{Path, PathBuf};

use gsapi_common::MethodTable;

use crate::entry::CacheEntry;
use crate::error::CacheError;

/// File extension of per-class cache files.
const ENTRY_EXT: &str = "json";

/// Reads and writes per-class cache entries under a single directory.
///
/// There is no locking: concurrent writers of the same class race and the
/// last write wins. All reads are fail-safe.
#[derive(Clone, Debug)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Creates a store rooted at `dir`. Nothing is touched on disk.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the cache directory (and parents) if it does not exist.
    pub fn init(&self) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CacheError::Io {
            path: self.dir.clone(),
            source: e,
        })
    }

    /// Returns the file that holds the entry for `class_name`.
    pub fn path_for(&self, class_name: &str) -> PathBuf {
        self.dir.join(format!("{class_name}.{ENTRY_EXT}"))
    }

    /// Reads the entry for `class_name`.
    ///
    /// Returns `None` if the file is missing or cannot be decoded.
    pub fn read(&self, class_name: &str) -> Option<CacheEntry> {
        match self.try_read(class_name) {
            Ok(entry) => Some(entry),
            Err(CacheError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                None
            }
            Err(err) => {
                tracing::debug!(class = class_name, error = %err, "ignoring unreadable cache entry");
                None
            }
        }
    }

    /// Reads the method table of `class_name`, treating an empty table as absent.
    pub fn read_methods(&self, class_name: &str) -> Option<MethodTable> {
        self.read(class_name)
            .filter(CacheEntry::is_usable)
            .map(|entry| entry.methods)
    }

    /// Reads and decodes the entry for `class_name`, reporting why it failed.
    pub fn try_read(&self, class_name: &str) -> Result<CacheEntry, CacheError> {
        let path = self.path_for(class_name);
        let content = std::fs::read_to_string(&path).map_err(|e| CacheError::Io {
            path: path.clone(),
            source: e,
        })?;
        let mut entry: CacheEntry =
            serde_json::from_str(&content).map_err(|e| CacheError::Serialization {
                path,
                reason: e.to_string(),
            })?;
        entry.class_name = class_name.to_string();
        Ok(entry)
    }

    /// Writes `entry` as the cache file of `class_name`, replacing any previous one.
    ///
    /// Creates the cache directory if it doesn't exist.
    pub fn write(&self, class_name: &str, entry: &CacheEntry) -> Result<PathBuf, CacheError> {
        self.init()?;
        let path = self.path_for(class_name);
        let json = serde_json::to_string_pretty(entry).map_err(|e| CacheError::Serialization {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        std::fs::write(&path, json).map_err(|e| CacheError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}
