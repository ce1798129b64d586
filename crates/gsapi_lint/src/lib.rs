//! Call-site validation of Game Script sources against cached API documentation.
//!
//! Scripts are never parsed with a grammar. A tolerant scanner finds
//! `GSClass.Method(...)` call sites and estimates their argument count; each
//! call to a tracked class is then checked against the cached method table.
//!
//! # Rules
//!
//! - **W001 `docs-unavailable`:** no usable cache entry for the class
//! - **E001 `unknown-method`:** the method is not documented (with suggestions)
//! - **E002 `arity-mismatch`:** no documented overload takes that many arguments

#![warn(missing_docs)]

pub mod calls;
pub mod catalog;
mod engine;
mod rules;
pub mod suggest;

pub use calls::{scan_calls, CallSite, CallSites};
pub use catalog::{MethodCatalog, Readiness};
pub use engine::LintEngine;
pub use rules::{register_builtin_rules, ArityMismatch, DocsUnavailable, UnknownMethod};
pub use suggest::{suggest, Suggestion};

use gsapi_common::MethodTable;
use gsapi_diagnostics::{Diagnostic, DiagnosticCode, Severity};

/// A single check applied to every call site of a tracked class.
///
/// `methods` is the class's method table, or `None` when no usable cache
/// entry exists. Rules build diagnostics at their default severity; the
/// engine applies allow/deny overrides.
pub trait LintRule: Send + Sync {
    /// Returns the diagnostic code for this rule (e.g., E002).
    fn code(&self) -> DiagnosticCode;

    /// Returns the short kebab-case name of this rule (e.g., "arity-mismatch").
    fn name(&self) -> &str;


    /// Returns the default severity for diagnostics emitted by this rule.
    fn default_severity(&self) -> Severity;

    /// Checks one call site.
    fn check_call(&self, call: &CallSite, methods: Option<&MethodTable>) -> Option<Diagnostic>;
}
