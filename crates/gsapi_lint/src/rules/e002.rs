//! E002: Arity mismatch. No documented overload takes that many arguments.

use gsapi_common::MethodTable;
use gsapi_diagnostics::{Category, Diagnostic, DiagnosticCode, Location, Severity};

use crate::{CallSite, LintRule};

/// Reports calls whose argument count matches none of the documented overloads.
///
/// The message lists every allowed arity in ascending order.
pub struct ArityMismatch;

impl LintRule for ArityMismatch {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Error, 2)
    }

    fn name(&self) -> &str {
        "arity-mismatch"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check_call(&self, call: &CallSite, methods: Option<&MethodTable>) -> Option<Diagnostic> {
        let allowed = methods?.arities(&call.method_name)?;
        if allowed.contains(&call.arity) {
            return None;
        }
        let listing: Vec<String> = allowed.iter().map(usize::to_string).collect();
        Some(
            Diagnostic::new(
                self.default_severity(),
                self.code(),
                self.name(),
                format!(
                    "Invalid arity for {}.{} -> {} args (allowed: {})",
                    call.class_name,
                    call.method_name,
                    call.arity,
                    listing.join("/")
                ),
                Location::new(call.line, call.column),
            )
            .with_note("argument counts are estimated by counting commas"),
        )
    }
}
