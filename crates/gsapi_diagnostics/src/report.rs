//! The flat message shape consumed by the editor lint harness.
//!
//! The harness expects, per source file, a list of
//! `{ruleId, message, severity, line, column}` objects where severity is
//! `0` (info), `1` (warning) or `2` (error).

use crate::diagnostic::Diagnostic;
use serde::{Deserialize, Serialize};

/// The rule identifier reported for every API usage problem.
pub const RULE_ID: &str = "openttd-gs/api-docs";

/// One lint harness message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintMessage {
    /// Always [`RULE_ID`].
    pub rule_id: String,
    /// The diagnostic message.
    pub message: String,
    /// Numeric severity: 0 info, 1 warning, 2 error.
    pub severity: u8,
    /// 1-indexed line.
    pub line: u32,
    /// 1-indexed column.
    pub column: u32,
}

impl From<&Diagnostic> for LintMessage {
    fn from(diag: &Diagnostic) -> Self {
        Self {
            rule_id: RULE_ID.to_string(),
            message: diag.message.clone(),
            severity: diag.severity.lint_level(),
            line: diag.location.line,
            column: diag.location.column,
        }
    }
}

/// Converts one file's diagnostics into lint harness messages, preserving order.
pub fn lint_messages(diagnostics: &[Diagnostic]) -> Vec<LintMessage> {
    diagnostics.iter().map(LintMessage::from).collect()
}
