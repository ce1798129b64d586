//! A parsed documentation page with CSS-selector text queries.

use scraper::{Html, Selector};

use crate::error::DocsError;

/// A parsed HTML documentation page.
pub struct DocPage {
    html: Html,
}

impl DocPage {
    /// Parses `markup` as an HTML document. Parsing never fails; broken markup
    /// is repaired the way browsers repair it.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Returns the number of elements matching `css`.
    pub fn count(&self, css: &str) -> Result<usize, DocsError> {
        let selector = compile(css)?;
        Ok(self.html.select(&selector).count())
    }

    /// Returns one whitespace-collapsed string per element matching `outer`.
    ///
    /// Each string joins the text of every descendant matching `inner`, in
    /// document order, separated by a space. Elements with no matching
    /// descendant yield an empty string.
    pub fn texts_within(&self, outer: &str, inner: &str) -> Result<Vec<String>, DocsError> {
        let outer_sel = compile(outer)?;
        let inner_sel = compile(inner)?;
        let texts = self
            .html
            .select(&outer_sel)
            .map(|element| {
                let parts: Vec<String> = element
                    .select(&inner_sel)
                    .map(|cell| cell.text().collect::<String>())
                    .collect();
                collapse_whitespace(&parts.join(" "))
            })
            .collect();
        Ok(texts)
    }
}

fn compile(css: &str) -> Result<Selector, DocsError> {
    Selector::parse(css).map_err(|e| DocsError::Selector {
        selector: css.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Collapses every run of whitespace (including non-breaking spaces) to a
/// single space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
