//! Diagnostic creation, severity management, and output rendering.
//!
//! This crate provides structured [`Diagnostic`] messages with severity levels,
//! codes, and help lines. [`TerminalRenderer`] formats them for humans and
//! [`LintMessage`] is the flat shape consumed by the editor lint harness.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod report;
pub mod severity;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::{Diagnostic, Location};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use report::{lint_messages, LintMessage, RULE_ID};
pub use severity::Severity;
