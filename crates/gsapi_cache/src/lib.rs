//! Durable per-class cache of parsed API documentation.
//!
//! Each tracked class is stored as `<cache_dir>/<ClassName>.json`, holding its
//! method table together with the HTTP validation headers of the page it was
//! parsed from. The store is shared between processes without locking; reads
//! are fail-safe and treat anything unreadable as a cache miss.

#![warn(missing_docs)]

pub mod entry;
pub mod error;
pub mod store;

pub use entry::{CacheEntry, ValidationHeaders};
pub use error::CacheError;
pub use store::CacheStore;
