//! Error types for documentation retrieval and parsing.

use thiserror::Error;

/// Errors raised while fetching or querying documentation pages.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The request could not be sent or its body could not be read.
    #[error("fetch failed for {url}: {reason}")]
    Network {
        /// The requested URL.
        url: String,
        /// The transport error message.
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("fetch failed {status} {url}")]
    HttpStatus {
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The class is not in the registry.
    #[error("'{0}' is not a tracked API class")]
    UnknownClass(String),

    /// A CSS selector used to query a page is malformed.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector {
        /// The selector text.
        selector: String,
        /// The parser's complaint.
        reason: String,
    },
}
