//! E001: Unknown method. The method is not in the class documentation.

use gsapi_common::MethodTable;
use gsapi_diagnostics::{Category, Diagnostic, DiagnosticCode, Location, Severity};

use crate::suggest::suggest;
use crate::{CallSite, LintRule};

/// Reports calls to methods the class documentation does not list.
///
/// Close matches among the documented names are appended to the message and
/// attached as help lines.
pub struct UnknownMethod {
    max_suggestions: usize,
    threshold: f64,
}

impl UnknownMethod {
    /// Creates the rule with the given suggestion limits.
    pub fn new(max_suggestions: usize, threshold: f64) -> Self {
        Self {
            max_suggestions,
            threshold,
        }
    }
}

impl LintRule for UnknownMethod {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Error, 1)
    }

    fn name(&self) -> &str {
        "unknown-method"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check_call(&self, call: &CallSite, methods: Option<&MethodTable>) -> Option<Diagnostic> {
        let methods = methods?;
        if methods.contains_method(&call.method_name) {
            return None;
        }

        let suggestions = suggest(
            methods.method_names(),
            &call.method_name,
            self.max_suggestions,
            self.threshold,
        );
        let mut message = format!(
            "{}.{} not found in API documentation",
            call.class_name, call.method_name
        );
        if !suggestions.is_empty() {
            let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
            message.push_str(&format!(" (did you mean: {}?)", names.join(", ")));
        }

        let mut diag = Diagnostic::new(
            self.default_severity(),
            self.code(),
            self.name(),
            message,
            Location::new(call.line, call.column),
        );
        for suggestion in &suggestions {
            diag = diag.with_help(format!("did you mean `{}.{}`?", call.class_name, suggestion.name));
        }
        Some(diag)
    }
}
