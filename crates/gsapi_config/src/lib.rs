//! Parsing and validation of `gsapi.toml` settings.
//!
//! This crate reads the optional settings file and produces strongly-typed
//! [`Settings`], and resolves where the documentation cache lives on disk.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_settings, load_settings_file, load_settings_from_str, CONFIG_FILE};
pub use resolve::{
    default_cache_dir, resolve_cache_dir, resolve_cache_dir_with, CacheDirSource,
    ResolvedCacheDir, CACHE_DIR_ENV,
};
pub use types::*;
