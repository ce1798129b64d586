//! Process-lifetime memo of per-class method tables.

use std::collections::HashMap;
use std::sync::OnceLock;

use gsapi_cache::CacheStore;
use gsapi_common::{tracked_classes, MethodTable};

/// How much of the documentation cache was usable when warming the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// Every tracked class has a usable method table.
    Ready,
    /// Some classes have no usable cache entry.
    Partial {
        /// The classes without a usable entry, in registry order.
        missing: Vec<&'static str>,
    },
    /// No class has a usable cache entry.
    Empty,
}

/// Method tables of the tracked classes, loaded lazily from a [`CacheStore`].
///
/// A table is loaded on first use and kept for the lifetime of the catalog.
/// Lookups that find no usable entry are not remembered, so a later lookup
/// will see an entry written in the meantime. Safe to share across threads.
pub struct MethodCatalog {
    store: CacheStore,
    tables: HashMap<&'static str, OnceLock<MethodTable>>,
}

impl MethodCatalog {
    /// Creates an empty catalog backed by `store`.
    pub fn new(store: CacheStore) -> Self {
        let tables = tracked_classes()
            .iter()
            .map(|class| (class.name, OnceLock::new()))
            .collect();
        Self { store, tables }
    }

    /// Returns the method table of `class_name`.
    ///
    /// Returns `None` for untracked classes and for classes whose cache entry
    /// is missing, unreadable, or empty.
    pub fn get(&self, class_name: &str) -> Option<&MethodTable> {
        let cell = self.tables.get(class_name)?;
        if let Some(table) = cell.get() {
            return Some(table);
        }
        let loaded = self.store.read_methods(class_name)?;
        tracing::debug!(class = class_name, methods = loaded.len(), "loaded method table");
        Some(cell.get_or_init(|| loaded))
    }

    /// Returns `true` if the table of `class_name` has been loaded.
    pub fn is_loaded(&self, class_name: &str) -> bool {
        self.tables
            .get(class_name)
            .is_some_and(|cell| cell.get().is_some())
    }

    /// Loads every tracked class up front and reports what is usable.
    pub fn warm(&self) -> Readiness {
        let missing: Vec<&'static str> = tracked_classes()
            .iter()
            .filter(|class| self.get(class.name).is_none())
            .map(|class| class.name)
            .collect();
        if missing.is_empty() {
            Readiness::Ready
        } else if missing.len() == tracked_classes().len() {
            Readiness::Empty
        } else {
            Readiness::Partial { missing }
        }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }
}
