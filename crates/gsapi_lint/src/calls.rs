//! Tolerant scanning of script text for `GSClass.Method(...)` call sites.

use gsapi_common::{balanced_args, comma_arity, LineIndex};
use once_cell::sync::Lazy;
use regex::Regex;

static CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(GS[A-Z][A-Za-z0-9_]*)\.([A-Za-z_][A-Za-z0-9_]*)\s*\(")
        .expect("call pattern is valid")
});

/// One observed call of an API class method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    /// The class name, e.g. `GSGoal`.
    pub class_name: String,
    /// The method name, e.g. `New`.
    pub method_name: String,
    /// Approximate argument count (comma-arity of the argument text).
    pub arity: usize,
    /// 1-indexed line of the class name.
    pub line: u32,
    /// 1-indexed byte column of the class name.
    pub column: u32,
    /// Byte offset of the class name.
    pub offset: usize,
}

/// Lazily yields the call sites of a text, in order of appearance.
///
/// Cloning the iterator gives an independent cursor, so a scan can be
/// restarted or replayed without rescanning from the start.
#[derive(Clone, Debug)]
pub struct CallSites<'a> {
    text: &'a str,
    pos: usize,
    lines: LineIndex,
}

/// Scans `text` for call sites.
///
/// The anchor search resumes right after each opening parenthesis, so calls
/// nested inside another call's arguments are reported as well. An argument
/// list that is never closed extends to the end of the text.
pub fn scan_calls(text: &str) -> CallSites<'_> {
    CallSites {
        text,
        pos: 0,
        lines: LineIndex::new(text),
    }
}

impl Iterator for CallSites<'_> {
    type Item = CallSite;

    fn next(&mut self) -> Option<CallSite> {
        if self.pos > self.text.len() {
            return None;
        }
        let caps = CALL.captures_at(self.text, self.pos)?;
        let anchor = caps.get(0)?;
        let class = caps.get(1)?;
        let method = caps.get(2)?;

        let (args, _) = balanced_args(&self.text[anchor.end()..]);
        self.pos = anchor.end();

        let (line, column) = self.lines.line_col(class.start() as u32);
        Some(CallSite {
            class_name: class.as_str().to_string(),
            method_name: method.as_str().to_string(),
            arity: comma_arity(args),
            line,
            column,
            offset: class.start(),
        })
    }
}
