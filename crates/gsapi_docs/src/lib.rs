//! Documentation retrieval, signature parsing, and cache maintenance.
//!
//! The maintenance path walks the class registry, asks a [`DocSource`] for each
//! class page (probing with `HEAD` first when a cached entry with validation
//! headers exists), parses method signatures out of the markup with a
//! [`SignatureParser`], and persists the resulting method table through a
//! [`gsapi_cache::CacheStore`].

#![warn(missing_docs)]

pub mod error;
pub mod extract;
pub mod fetcher;
pub mod freshness;
pub mod maintain;
pub mod page;

pub use error::DocsError;
pub use extract::{
    parse_signature, LegacyTableExtractor, MemberProtoExtractor, SignatureExtractor,
    SignatureParser,
};
pub use fetcher::{capture_headers, DocSource, FetchedPage, HttpDocSource};
pub use freshness::{assess, needs_refresh, Freshness};
pub use maintain::{ClassOutcome, Maintainer, RefreshOptions, RefreshOutcome};
pub use page::DocPage;
