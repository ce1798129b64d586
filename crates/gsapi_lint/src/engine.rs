//! Lint engine that manages rule registration, configuration, and execution.
//!
//! The `LintEngine` accepts a `LintConfig` to control which rules are denied
//! or allowed, then scans a script's text and runs each enabled rule on every
//! call site of a tracked class.

use std::collections::HashSet;

use gsapi_common::is_tracked;
use gsapi_config::LintConfig;
use gsapi_diagnostics::{Diagnostic, Severity};

use crate::calls::scan_calls;
use crate::catalog::MethodCatalog;
use crate::rules::register_builtin_rules;
use crate::LintRule;

/// Runs call-site rules over script sources.
///
/// Rules are registered at construction time. Rules named in `allow` are
/// suppressed; rules named in `deny` are promoted to error severity.
pub struct LintEngine {
    /// All registered rules, in evaluation order.
    rules: Vec<Box<dyn LintRule>>,
    /// Rule names promoted to error severity.
    denied: HashSet<String>,
    /// Rule names that are not reported.
    allowed: HashSet<String>,
}

impl LintEngine {
    /// Creates an engine with the built-in rules configured by `config`.
    pub fn new(config: &LintConfig) -> Self {
        let mut engine = Self {
            rules: Vec::new(),
            denied: config.deny.iter().cloned().collect(),
            allowed: config.allow.iter().cloned().collect(),
        };
        register_builtin_rules(&mut engine, config);
        engine
    }

    /// Creates an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(&LintConfig::default())
    }

    /// Registers a rule with the engine.
    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Returns the names of all registered rules.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Checks every call site in `source` and returns the diagnostics in source order.
    ///
    /// Calls to untracked classes are skipped without consulting `catalog`.
    pub fn check_source(&self, source: &str, catalog: &MethodCatalog) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for call in scan_calls(source) {
            tracing::trace!(
                class = %call.class_name,
                method = %call.method_name,
                arity = call.arity,
                "call"
            );
            if !is_tracked(&call.class_name) {
                continue;
            }
            let methods = catalog.get(&call.class_name);
            for rule in &self.rules {
                if self.allowed.contains(rule.name()) {
                    continue;
                }
                if let Some(mut diag) = rule.check_call(&call, methods) {
                    if self.denied.contains(rule.name()) {
                        diag.severity = Severity::Error;
                    }
                    diagnostics.push(diag);
                }
            }
        }
        diagnostics
    }
}
