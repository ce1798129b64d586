//! Per-class mapping from method name to documented overload arities.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The documented methods of one API class and the arities of their overloads.
///
/// Arities are kept in a sorted set so listings are always ascending.
/// Serialized as a JSON object mapping each method name to an array of arities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodTable {
    methods: BTreeMap<String, BTreeSet<usize>>,
}

impl MethodTable {
    /// Creates an empty method table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `name` has an overload taking `arity` parameters.
    ///
    /// Inserting the same pair twice is a no-op.
    pub fn insert(&mut self, name: impl Into<String>, arity: usize) {
        self.methods.entry(name.into()).or_default().insert(arity);
    }

    /// Merges every method and arity of `other` into this table.
    pub fn merge(&mut self, other: &MethodTable) {
        for (name, arities) in &other.methods {
            self.methods
                .entry(name.clone())
                .or_default()
                .extend(arities.iter().copied());
        }
    }

    /// Returns `true` if the table documents a method called `name`.
    pub fn contains_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Returns the documented arities of `name`, ascending.
    pub fn arities(&self, name: &str) -> Option<&BTreeSet<usize>> {
        self.methods.get(name)
    }

    /// Returns `true` if `name` has an overload taking exactly `arity` parameters.
    pub fn allows(&self, name: &str, arity: usize) -> bool {
        self.methods
            .get(name)
            .is_some_and(|arities| arities.contains(&arity))
    }

    /// Iterates over method names in sorted order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Iterates over `(name, arities)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<usize>)> {
        self.methods.iter().map(|(name, arities)| (name.as_str(), arities))
    }

    /// Returns the number of documented methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if no methods are documented.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for MethodTable {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut table = MethodTable::new();
        for (name, arity) in iter {
            table.insert(name, arity);
        }
        table
    }
}
