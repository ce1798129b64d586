//! Conformance test helpers for the Game Script API checker.
//!
//! Provides an in-memory documentation source, a throwaway cache directory,
//! and shortcuts that run script text through the full check pipeline and
//! return structured results for assertion in integration tests.

#![warn(missing_docs)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use gsapi_cache::{CacheEntry, CacheStore, ValidationHeaders};
use gsapi_common::MethodTable;
use gsapi_config::LintConfig;
use gsapi_diagnostics::{Diagnostic, Severity};
use gsapi_docs::{DocSource, DocsError, FetchedPage, Maintainer};
use gsapi_lint::{LintEngine, MethodCatalog};

/// Base URL reported by [`MemoryDocSource`].
pub const MEMORY_BASE: &str = "memory://gs-api";

/// Result of checking one script.
pub struct CheckResult {
    /// All diagnostics, in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl CheckResult {
    fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let error_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        let warning_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
        Self {
            diagnostics,
            error_count,
            warning_count,
        }
    }
}

/// A cache directory that is deleted when dropped.
pub struct CacheFixture {
    dir: tempfile::TempDir,
}

impl CacheFixture {
    /// Creates an empty cache directory.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp cache dir"),
        }
    }

    /// Returns a store over the fixture directory.
    pub fn store(&self) -> CacheStore {
        CacheStore::new(self.dir.path())
    }

    /// Writes a cache entry for `class` with the given `(method, arities)` pairs.
    pub fn seed(&self, class: &str, methods: &[(&str, &[usize])]) -> &Self {
        let table = methods
            .iter()
            .flat_map(|(name, arities)| arities.iter().map(move |a| (*name, *a)))
            .collect::<MethodTable>();
        let entry = CacheEntry::new(class, table, ValidationHeaders::default(), Utc::now());
        self.store().write(class, &entry).expect("seed cache entry");
        self
    }

    /// Returns a fresh catalog over the fixture directory.
    pub fn catalog(&self) -> MethodCatalog {
        MethodCatalog::new(self.store())
    }

    /// Checks `source` with the default rules.
    pub fn check(&self, source: &str) -> CheckResult {
        self.check_with(source, &LintConfig::default())
    }

    /// Checks `source` with custom lint settings.
    pub fn check_with(&self, source: &str, config: &LintConfig) -> CheckResult {
        let engine = LintEngine::new(config);
        CheckResult::from_diagnostics(engine.check_source(source, &self.catalog()))
    }

    /// Builds a maintainer over `source` writing into the fixture directory.
    pub fn maintainer<S: DocSource>(&self, source: S) -> Maintainer<S> {
        Maintainer::new(source, self.store())
    }
}

impl Default for CacheFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Documentation pages served from memory, with request counters.
#[derive(Default)]
pub struct MemoryDocSource {
    pages: Mutex<HashMap<String, FetchedPage>>,
    failing_heads: AtomicBool,
    fetches: AtomicUsize,
    heads: AtomicUsize,
}

impl MemoryDocSource {
    /// Creates a source with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `markup` for `doc_page` with the given ETag.
    pub fn with_page(self, doc_page: &str, markup: impl Into<String>, etag: &str) -> Self {
        self.set_page(doc_page, markup, etag);
        self
    }

    /// Replaces the page served for `doc_page`.
    pub fn set_page(&self, doc_page: &str, markup: impl Into<String>, etag: &str) {
        let headers = ValidationHeaders {
            etag: Some(etag.to_string()),
            ..ValidationHeaders::default()
        };
        let page = FetchedPage {
            markup: markup.into(),
            headers,
        };
        if let Ok(mut pages) = self.pages.lock() {
            pages.insert(doc_page.to_string(), page);
        }
    }

    /// Makes every subsequent `HEAD` request fail.
    pub fn fail_heads(&self) {
        self.failing_heads.store(true, Ordering::SeqCst);
    }

    /// Number of full fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of `HEAD` requests served so far.
    pub fn head_count(&self) -> usize {
        self.heads.load(Ordering::SeqCst)
    }

    fn lookup(&self, doc_page: &str) -> Result<FetchedPage, DocsError> {
        self.pages
            .lock()
            .ok()
            .and_then(|pages| pages.get(doc_page).cloned())
            .ok_or_else(|| DocsError::HttpStatus {
                url: self.url_for(doc_page),
                status: 404,
            })
    }
}

impl DocSource for MemoryDocSource {
    fn url_for(&self, doc_page: &str) -> String {
        format!("{MEMORY_BASE}/{doc_page}")
    }

    fn fetch(&self, doc_page: &str) -> Result<FetchedPage, DocsError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.lookup(doc_page)
    }

    fn head(&self, doc_page: &str) -> Result<ValidationHeaders, DocsError> {
        self.heads.fetch_add(1, Ordering::SeqCst);
        if self.failing_heads.load(Ordering::SeqCst) {
            return Err(DocsError::Network {
                url: self.url_for(doc_page),
                reason: "connection refused".to_string(),
            });
        }
        self.lookup(doc_page).map(|page| page.headers)
    }
}

/// Renders a member-documentation page listing the given signatures.
///
/// Each signature is written as a `div.memitem` prototype, e.g.
/// `"static bool GSGoal::Remove (GoalID goal_id)"`.
pub fn doc_page(signatures: &[&str]) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html><body><div class=\"contents\">\n");
    for signature in signatures {
        html.push_str("<div class=\"memitem\">\n<div class=\"memproto\">\n<table class=\"memname\"><tr><td class=\"memname\">");
        html.push_str(signature);
        html.push_str("</td></tr></table>\n</div>\n<div class=\"memdoc\"><p>Documented.</p></div>\n</div>\n");
    }
    html.push_str("</div></body></html>\n");
    html
}
