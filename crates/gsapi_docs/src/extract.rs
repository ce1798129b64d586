//! Method signature extraction from the two known documentation layouts.

use gsapi_common::{comma_arity, MethodTable};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DocsError;
use crate::page::DocPage;

static SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\(([^)]*)\)").expect("signature pattern is valid")
});

/// Extracts the first `name(params)` of a signature fragment with its arity.
///
/// Returns `None` if the fragment contains no call-shaped text.
pub fn parse_signature(fragment: &str) -> Option<(&str, usize)> {
    let caps = SIGNATURE.captures(fragment)?;
    let name = caps.get(1)?.as_str();
    let params = caps.get(2)?.as_str();
    Some((name, comma_arity(params)))
}

/// One documentation layout: knows where signature text lives in a page.
pub trait SignatureExtractor {
    /// A short name for the layout, used in logs.
    fn layout(&self) -> &'static str;

    /// Returns the whitespace-collapsed signature text of every member.
    fn fragments(&self, page: &DocPage) -> Result<Vec<String>, DocsError>;

    /// Parses every fragment into a method table.
    fn extract(&self, page: &DocPage) -> Result<MethodTable, DocsError> {
        let mut table = MethodTable::new();
        for fragment in self.fragments(page)? {
            if let Some((name, arity)) = parse_signature(&fragment) {
                table.insert(name, arity);
            }
        }
        Ok(table)
    }
}

/// The member declaration table: `table.memberdecls tr.memitem` rows whose
/// `td.memItemLeft` and `td.memItemRight` cells hold the signature.
#[derive(Clone, Copy, Debug, Default)]
pub struct LegacyTableExtractor;

impl SignatureExtractor for LegacyTableExtractor {
    fn layout(&self) -> &'static str {
        "table rows"
    }

    fn fragments(&self, page: &DocPage) -> Result<Vec<String>, DocsError> {
        page.texts_within("table.memberdecls tr.memitem", "td.memItemLeft, td.memItemRight")
    }
}

/// Member documentation blocks: `div.memitem` with a `div.memproto` prototype.
/// Blocks with an empty prototype are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemberProtoExtractor;

impl SignatureExtractor for MemberProtoExtractor {
    fn layout(&self) -> &'static str {
        "div.memitem"
    }

    fn fragments(&self, page: &DocPage) -> Result<Vec<String>, DocsError> {
        let mut texts = page.texts_within("div.memitem", "div.memproto")?;
        texts.retain(|t| !t.is_empty());
        Ok(texts)
    }
}

/// Runs every registered layout over a page and unions the results.
pub struct SignatureParser {
    extractors: Vec<Box<dyn SignatureExtractor + Send + Sync>>,
}

impl SignatureParser {
    /// Creates a parser for both known layouts.
    pub fn new() -> Self {
        Self::with_extractors(vec![
            Box::new(LegacyTableExtractor),
            Box::new(MemberProtoExtractor),
        ])
    }

    /// Creates a parser for a custom set of layouts.
    pub fn with_extractors(extractors: Vec<Box<dyn SignatureExtractor + Send + Sync>>) -> Self {
        Self { extractors }
    }

    /// Parses `markup` into a method table.
    ///
    /// Layouts that match nothing contribute nothing; a page with no
    /// recognizable signatures yields an empty table.
    pub fn parse(&self, markup: &str) -> MethodTable {
        let page = DocPage::parse(markup);
        let mut table = MethodTable::new();
        for extractor in &self.extractors {
            match extractor.extract(&page) {
                Ok(found) => {
                    tracing::debug!(layout = extractor.layout(), methods = found.len(), "parsed layout");
                    table.merge(&found);
                }
                Err(err) => {
                    tracing::warn!(layout = extractor.layout(), error = %err, "layout skipped");
                }
            }
        }
        table
    }
}

impl Default for SignatureParser {
    fn default() -> Self {
        Self::new()
    }
}
