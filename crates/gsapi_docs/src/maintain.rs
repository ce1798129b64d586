//! Cache maintenance: refreshing tracked classes from their documentation pages.

use chrono::{DateTime, Utc};
use gsapi_cache::{CacheEntry, CacheStore};
use gsapi_common::{find_class, tracked_classes, MethodTable, TrackedClass};

use crate::error::DocsError;
use crate::extract::SignatureParser;
use crate::fetcher::DocSource;
use crate::freshness::needs_refresh;

/// Options for a maintenance run.
#[derive(Clone, Copy, Debug, Default)]
pub struct RefreshOptions {
    /// Skip the freshness probe and always fetch.
    pub force: bool,
}

/// What a refresh did for one class.
#[derive(Clone, Debug, PartialEq)]
pub enum RefreshOutcome {
    /// The cached entry was confirmed fresh and reused.
    Reused(MethodTable),
    /// The page was fetched and parsed.
    Fetched {
        /// The parsed methods. May be empty.
        methods: MethodTable,
        /// Whether the entry was written to the cache.
        persisted: bool,
    },
}

impl RefreshOutcome {
    /// Returns the method table the refresh produced.
    pub fn methods(&self) -> &MethodTable {
        match self {
            RefreshOutcome::Reused(methods) => methods,
            RefreshOutcome::Fetched { methods, .. } => methods,
        }
    }
}

/// The result of refreshing one class in an isolated run.
pub type ClassOutcome = (&'static str, Result<RefreshOutcome, DocsError>);

/// Keeps the cache in sync with the documentation source.
pub struct Maintainer<S> {
    source: S,
    store: CacheStore,
    parser: SignatureParser,
    clock: fn() -> DateTime<Utc>,
}

impl<S: DocSource> Maintainer<S> {
    /// Creates a maintainer writing to `store`.
    pub fn new(source: S, store: CacheStore) -> Self {
        Self {
            source,
            store,
            parser: SignatureParser::new(),
            clock: Utc::now,
        }
    }

    /// Replaces the clock used for freshness checks and `cached_at` stamps.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the documentation source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the cache store.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Refreshes one class.
    ///
    /// Unless `force` is set, an existing entry with validation headers is
    /// probed with `HEAD` and reused when still fresh. A failed probe falls
    /// through to a full fetch. Fetch failures are returned; cache write
    /// failures are logged and reported as `persisted: false`. Empty tables
    /// are never written.
    pub fn refresh_class(
        &self,
        class_name: &str,
        options: RefreshOptions,
    ) -> Result<RefreshOutcome, DocsError> {
        let class =
            find_class(class_name).ok_or_else(|| DocsError::UnknownClass(class_name.to_string()))?;

        if !options.force {
            if let Some(methods) = self.reusable(class) {
                return Ok(RefreshOutcome::Reused(methods));
            }
        }

        let url = self.source.url_for(class.doc_page);
        tracing::debug!(class = class.name, %url, "fetch");
        let page = self.source.fetch(class.doc_page)?;
        let methods = self.parser.parse(&page.markup);
        tracing::debug!(class = class.name, methods = methods.len(), "parsed");

        if methods.is_empty() {
            tracing::warn!(class = class.name, %url, "no method signatures found; cache not written");
            return Ok(RefreshOutcome::Fetched {
                methods,
                persisted: false,
            });
        }

        let entry = CacheEntry::new(class.name, methods, page.headers, (self.clock)());
        let persisted = match self.store.write(class.name, &entry) {
            Ok(path) => {
                tracing::debug!(class = class.name, path = %path.display(), "cache saved");
                true
            }
            Err(err) => {
                tracing::warn!(class = class.name, error = %err, "failed to save cache entry");
                false
            }
        };
        Ok(RefreshOutcome::Fetched {
            methods: entry.methods,
            persisted,
        })
    }

    /// Refreshes every tracked class in registry order, stopping at the first failure.
    pub fn update_all(
        &self,
        options: RefreshOptions,
    ) -> Result<Vec<(&'static str, RefreshOutcome)>, DocsError> {
        self.prepare();
        let mut outcomes = Vec::with_capacity(tracked_classes().len());
        for class in tracked_classes() {
            let outcome = self.refresh_class(class.name, options)?;
            outcomes.push((class.name, outcome));
        }
        tracing::debug!(classes = outcomes.len(), "cache update complete");
        Ok(outcomes)
    }

    /// Refreshes every tracked class in registry order, continuing past failures.
    pub fn update_each(&self, options: RefreshOptions) -> Vec<ClassOutcome> {
        self.prepare();
        tracked_classes()
            .iter()
            .map(|class| (class.name, self.refresh_class(class.name, options)))
            .collect()
    }

    fn prepare(&self) {
        tracing::debug!(dir = %self.store.dir().display(), "updating documentation cache");
        if let Err(err) = self.store.init() {
            tracing::warn!(error = %err, "cannot create cache directory");
        }
    }

    fn reusable(&self, class: &TrackedClass) -> Option<MethodTable> {
        let entry = self.store.read(class.name).filter(CacheEntry::is_usable)?;
        let cached_headers = entry.headers.as_ref()?;
        match self.source.head(class.doc_page) {
            Ok(live) => {
                if needs_refresh(Some(cached_headers), &live, (self.clock)()) {
                    tracing::debug!(class = class.name, "cache stale");
                    None
                } else {
                    tracing::debug!(class = class.name, "cache hit, no refresh needed");
                    Some(entry.methods)
                }
            }
            Err(err) => {
                tracing::debug!(class = class.name, error = %err, "HEAD probe failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchedPage;
    use chrono::TimeZone;
    use gsapi_cache::ValidationHeaders;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn page(methods: &[&str]) -> String {
        let mut html = String::from("<html><body>");
        for sig in methods {
            html.push_str(&format!(
                r#"<div class="memitem"><div class="memproto">static bool {sig}</div></div>"#
            ));
        }
        html.push_str("</body></html>");
        html
    }

    #[derive(Default)]
    struct FakeSource {
        pages: HashMap<String, (String, ValidationHeaders)>,
        head_fails: bool,
        fetches: AtomicUsize,
        heads: AtomicUsize,
    }

    impl FakeSource {
        fn with_page(mut self, doc_page: &str, markup: String, etag: &str) -> Self {
            let headers = ValidationHeaders {
                etag: Some(etag.to_string()),
                ..ValidationHeaders::default()
            };
            self.pages.insert(doc_page.to_string(), (markup, headers));
            self
        }

        fn lookup(&self, doc_page: &str) -> Result<&(String, ValidationHeaders), DocsError> {
            self.pages.get(doc_page).ok_or_else(|| DocsError::HttpStatus {
                url: self.url_for(doc_page),
                status: 404,
            })
        }
    }

    impl DocSource for FakeSource {
        fn url_for(&self, doc_page: &str) -> String {
            format!("memory:///{doc_page}")
        }

        fn fetch(&self, doc_page: &str) -> Result<FetchedPage, DocsError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.lookup(doc_page).map(|(markup, headers)| FetchedPage {
                markup: markup.clone(),
                headers: headers.clone(),
            })
        }

        fn head(&self, doc_page: &str) -> Result<ValidationHeaders, DocsError> {
            self.heads.fetch_add(1, Ordering::SeqCst);
            if self.head_fails {
                return Err(DocsError::Network {
                    url: self.url_for(doc_page),
                    reason: "connection reset".to_string(),
                });
            }
            self.lookup(doc_page).map(|(_, headers)| headers.clone())
        }
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
    }

    fn maintainer(source: FakeSource) -> (tempfile::TempDir, Maintainer<FakeSource>) {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("cache"));
        (dir, Maintainer::new(source, store).with_clock(fixed_clock))
    }

    #[test]
    fn first_refresh_fetches_and_persists() {
        let source = FakeSource::default().with_page(
            "classGSGoal.html",
            page(&["New (a, b, c, d)", "Remove (a)"]),
            "v1",
        );
        let (_dir, m) = maintainer(source);
        let outcome = m.refresh_class("GSGoal", RefreshOptions::default()).unwrap();
        assert!(matches!(outcome, RefreshOutcome::Fetched { persisted: true, .. }));
        assert!(outcome.methods().allows("New", 4));

        let entry = m.store().read("GSGoal").unwrap();
        assert_eq!(entry.headers.unwrap().etag.as_deref(), Some("v1"));
        assert_eq!(entry.cached_at, Some(fixed_clock()));
        // Nothing was cached yet, so no probe was made.
        assert_eq!(m.source().heads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fresh_entry_is_reused_after_head_probe() {
        let source =
            FakeSource::default().with_page("classGSSign.html", page(&["IsValidSign (id)"]), "v1");
        let (_dir, m) = maintainer(source);
        m.refresh_class("GSSign", RefreshOptions::default()).unwrap();
        let outcome = m.refresh_class("GSSign", RefreshOptions::default()).unwrap();
        assert!(matches!(outcome, RefreshOutcome::Reused(_)));
        assert!(outcome.methods().allows("IsValidSign", 1));
        assert_eq!(m.source().fetches.load(Ordering::SeqCst), 1);
        assert_eq!(m.source().heads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn force_skips_probe() {
        let source =
            FakeSource::default().with_page("classGSSign.html", page(&["IsValidSign (id)"]), "v1");
        let (_dir, m) = maintainer(source);
        m.refresh_class("GSSign", RefreshOptions::default()).unwrap();
        let outcome = m.refresh_class("GSSign", RefreshOptions { force: true }).unwrap();
        assert!(matches!(outcome, RefreshOutcome::Fetched { .. }));
        assert_eq!(m.source().heads.load(Ordering::SeqCst), 0);
        assert_eq!(m.source().fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_probe_falls_through_to_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let markup = page(&["GetYear (date)"]);

        let warm = FakeSource::default().with_page("classGSDate.html", markup.clone(), "v1");
        Maintainer::new(warm, CacheStore::new(dir.path()))
            .refresh_class("GSDate", RefreshOptions::default())
            .unwrap();

        let flaky = FakeSource {
            head_fails: true,
            ..FakeSource::default()
        }
        .with_page("classGSDate.html", markup, "v1");
        let m = Maintainer::new(flaky, CacheStore::new(dir.path())).with_clock(fixed_clock);
        let outcome = m.refresh_class("GSDate", RefreshOptions::default()).unwrap();
        assert!(matches!(outcome, RefreshOutcome::Fetched { .. }));
        assert_eq!(m.source().heads.load(Ordering::SeqCst), 1);
        assert_eq!(m.source().fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_parse_is_not_persisted() {
        let source = FakeSource::default().with_page("classGSNews.html", page(&[]), "v1");
        let (_dir, m) = maintainer(source);
        let outcome = m.refresh_class("GSNews", RefreshOptions::default()).unwrap();
        assert_eq!(
            outcome,
            RefreshOutcome::Fetched {
                methods: MethodTable::new(),
                persisted: false
            }
        );
        assert!(m.store().read("GSNews").is_none());
    }

    #[test]
    fn unknown_class_is_rejected() {
        let (_dir, m) = maintainer(FakeSource::default());
        assert!(matches!(
            m.refresh_class("GSVehicle", RefreshOptions::default()),
            Err(DocsError::UnknownClass(name)) if name == "GSVehicle"
        ));
    }

    fn full_source(missing: Option<&str>) -> FakeSource {
        let mut source = FakeSource::default();
        for class in tracked_classes() {
            if Some(class.name) == missing {
                continue;
            }
            source = source.with_page(class.doc_page, page(&["GetName (id)"]), "v1");
        }
        source
    }

    #[test]
    fn update_all_walks_registry_in_order() {
        let (_dir, m) = maintainer(full_source(None));
        let outcomes = m.update_all(RefreshOptions::default()).unwrap();
        let names: Vec<&str> = outcomes.iter().map(|(name, _)| *name).collect();
        let expected: Vec<&str> = tracked_classes().iter().map(|c| c.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn update_all_aborts_on_first_failure() {
        let (_dir, m) = maintainer(full_source(Some("GSDate")));
        let err = m.update_all(RefreshOptions::default()).unwrap_err();
        assert!(matches!(err, DocsError::HttpStatus { status: 404, .. }));
        // GSNews, GSCompany, GSController succeeded before GSDate failed.
        assert!(m.store().read("GSController").is_some());
        assert!(m.store().read("GSEventController").is_none());
        assert_eq!(m.source().fetches.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn update_each_isolates_failures() {
        let (_dir, m) = maintainer(full_source(Some("GSDate")));
        let outcomes = m.update_each(RefreshOptions::default());
        assert_eq!(outcomes.len(), tracked_classes().len());
        let failed: Vec<&str> = outcomes
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(failed, vec!["GSDate"]);
        assert!(m.store().read("GSStation").is_some());
    }
}
