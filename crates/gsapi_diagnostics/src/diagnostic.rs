//! Structured diagnostic messages with severity, codes, locations, and help.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A 1-indexed line/column position inside a script file.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    /// The 1-indexed line number.
    pub line: u32,
    /// The 1-indexed column (in bytes).
    pub column: u32,
}

impl Location {
    /// The start of a file, used when no better position is known.
    pub const START: Location = Location { line: 1, column: 1 };

    /// Creates a location from a line and column.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A structured diagnostic attached to one call site in a script file.
///
/// Each diagnostic carries:
/// - A severity level and a code (`E001`, `W001`, ...)
/// - The kebab-case name of the rule that produced it
/// - A primary message and the location of the offending call
/// - Optional notes and help lines (e.g., method name suggestions)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of problem.
    pub code: DiagnosticCode,
    /// The kebab-case name of the rule that emitted this diagnostic.
    pub rule: String,
    /// The main diagnostic message.
    pub message: String,
    /// Where the offending call starts.
    pub location: Location,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with an explicit severity.
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        rule: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            severity,
            code,
            rule: rule.into(),
            message: message.into(),
            location,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(
        code: DiagnosticCode,
        rule: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(Severity::Error, code, rule, message, location)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(
        code: DiagnosticCode,
        rule: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(Severity::Warning, code, rule, message, location)
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}
