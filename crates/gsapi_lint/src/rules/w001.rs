//! W001: Documentation unavailable. The class has no usable cache entry.

use gsapi_common::MethodTable;
use gsapi_diagnostics::{Category, Diagnostic, DiagnosticCode, Location, Severity};

use crate::{CallSite, LintRule};

/// Reports calls to a tracked class whose method table is missing or empty.
pub struct DocsUnavailable;

impl LintRule for DocsUnavailable {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Warning, 1)
    }

    fn name(&self) -> &str {
        "docs-unavailable"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check_call(&self, call: &CallSite, methods: Option<&MethodTable>) -> Option<Diagnostic> {
        if methods.is_some() {
            return None;
        }
        Some(
            Diagnostic::new(
                self.default_severity(),
                self.code(),
                self.name(),
                format!(
                    "API documentation not available for {} (cache may not be initialized)",
                    call.class_name
                ),
                Location::new(call.line, call.column),
            )
            .with_help("run `gsapi update` to populate the documentation cache"),
        )
    }
}
