//! Approximate argument counting shared by signature parsing and call scanning.
//!
//! Neither the documentation markup nor the script source is parsed with a
//! grammar. Instead the argument (or parameter) list is delimited by tracking
//! parenthesis depth, and its arity is the number of commas in it plus one.
//! This is deliberately approximate:
//!
//! - commas inside nested calls (`Foo(a, b)` as an argument) are counted,
//! - commas and parentheses inside string literals are counted,
//! - generic parameter lists (`Map<K, V>`) are counted.
//!
//! The tests below pin these blind spots as the expected behavior.

/// Counts the comma-separated items in a raw argument or parameter list.
///
/// Returns 0 for a blank list, otherwise the number of commas plus one.
pub fn comma_arity(raw: &str) -> usize {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        0
    } else {
        trimmed.matches(',').count() + 1
    }
}

/// Returns the raw argument text that follows an opening parenthesis.
///
/// `text` must start immediately after the `(`. The scan tracks parenthesis
/// depth and stops at the `)` that brings the depth back to zero; if the list
/// is never closed the rest of the input is returned. The second element is
/// the byte length consumed, including the closing parenthesis when present.
pub fn balanced_args(text: &str) -> (&str, usize) {
    let mut depth = 1usize;
    for (idx, byte) in text.bytes().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return (&text[..idx], idx + 1);
                }
            }
            _ => {}
        }
    }
    (text, text.len())
}
