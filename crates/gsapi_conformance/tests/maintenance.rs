//! Cache maintenance against an in-memory documentation source.

use gsapi_cache::{CacheEntry, ValidationHeaders};
use gsapi_common::{tracked_classes, MethodTable};
use gsapi_conformance::{doc_page, CacheFixture, MemoryDocSource};
use gsapi_docs::{DocsError, RefreshOptions, RefreshOutcome};

const GOAL_PAGE: &[&str] = &[
    "static GoalID GSGoal::New (CompanyID company, Text goal, GoalType type, SQInteger destination)",
    "static bool GSGoal::Remove (GoalID goal_id)",
    "static bool GSGoal::SetText (GoalID goal_id, Text goal)",
];

fn goal_source(etag: &str) -> MemoryDocSource {
    MemoryDocSource::new().with_page("classGSGoal.html", doc_page(GOAL_PAGE), etag)
}

/// Serves a one-method page for every tracked class.
fn full_source() -> MemoryDocSource {
    let source = MemoryDocSource::new();
    for class in tracked_classes() {
        let signature = format!("static bool {}::IsValid (SQInteger id)", class.name);
        source.set_page(class.doc_page, doc_page(&[signature.as_str()]), "v1");
    }
    source.set_page("classGSGoal.html", doc_page(GOAL_PAGE), "v1");
    source
}

fn normal() -> RefreshOptions {
    RefreshOptions::default()
}

fn forced() -> RefreshOptions {
    RefreshOptions { force: true }
}

#[test]
fn first_refresh_fetches_and_persists() {
    let cache = CacheFixture::new();
    let maintainer = cache.maintainer(goal_source("\"abc\""));
    let outcome = maintainer.refresh_class("GSGoal", normal()).unwrap();
    assert!(matches!(outcome, RefreshOutcome::Fetched { persisted: true, .. }));

    let entry = cache.store().read("GSGoal").unwrap();
    assert!(entry.methods.allows("New", 4));
    assert!(entry.methods.allows("Remove", 1));
    assert!(entry.methods.allows("SetText", 2));
    assert_eq!(entry.headers.unwrap().etag.as_deref(), Some("\"abc\""));
    assert!(entry.cached_at.is_some());
    // No cached entry yet, so there is nothing to probe.
    assert_eq!(maintainer.source().head_count(), 0);
}

#[test]
fn matching_etag_reuses_cache_without_fetching() {
    let cache = CacheFixture::new();
    let maintainer = cache.maintainer(goal_source("\"abc\""));
    maintainer.refresh_class("GSGoal", normal()).unwrap();
    let path = cache.store().path_for("GSGoal");
    let before = std::fs::read(&path).unwrap();

    let outcome = maintainer.refresh_class("GSGoal", normal()).unwrap();
    assert!(matches!(outcome, RefreshOutcome::Reused(_)));
    assert!(outcome.methods().allows("New", 4));
    assert_eq!(maintainer.source().fetch_count(), 1);
    assert_eq!(maintainer.source().head_count(), 1);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn changed_etag_refetches() {
    let cache = CacheFixture::new();
    let maintainer = cache.maintainer(goal_source("\"v1\""));
    maintainer.refresh_class("GSGoal", normal()).unwrap();

    maintainer.source().set_page(
        "classGSGoal.html",
        doc_page(&["static bool GSGoal::Question (SQInteger id, CompanyID company, Text question)"]),
        "\"v2\"",
    );
    let outcome = maintainer.refresh_class("GSGoal", normal()).unwrap();
    assert!(matches!(outcome, RefreshOutcome::Fetched { persisted: true, .. }));
    assert_eq!(maintainer.source().fetch_count(), 2);

    let entry = cache.store().read("GSGoal").unwrap();
    assert!(entry.methods.allows("Question", 3));
    assert!(!entry.methods.contains_method("New"));
}

#[test]
fn forced_refresh_never_probes() {
    let cache = CacheFixture::new();
    let maintainer = cache.maintainer(goal_source("\"abc\""));
    maintainer.refresh_class("GSGoal", normal()).unwrap();

    // Same ETag, different content: only a forced refresh picks it up.
    maintainer.source().set_page(
        "classGSGoal.html",
        doc_page(&["static bool GSGoal::CloseQuestion (SQInteger id)"]),
        "\"abc\"",
    );
    for _ in 0..2 {
        let outcome = maintainer.refresh_class("GSGoal", forced()).unwrap();
        assert!(matches!(outcome, RefreshOutcome::Fetched { .. }));
    }
    assert_eq!(maintainer.source().head_count(), 0);
    assert_eq!(maintainer.source().fetch_count(), 3);
    let entry = cache.store().read("GSGoal").unwrap();
    assert!(entry.methods.allows("CloseQuestion", 1));
}

#[test]
fn failed_probe_falls_through_to_fetch() {
    let cache = CacheFixture::new();
    let maintainer = cache.maintainer(goal_source("\"abc\""));
    maintainer.refresh_class("GSGoal", normal()).unwrap();
    maintainer.source().fail_heads();

    let outcome = maintainer.refresh_class("GSGoal", normal()).unwrap();
    assert!(matches!(outcome, RefreshOutcome::Fetched { .. }));
    assert_eq!(maintainer.source().head_count(), 1);
    assert_eq!(maintainer.source().fetch_count(), 2);
}

#[test]
fn entry_without_headers_is_refetched_without_probe() {
    let cache = CacheFixture::new();
    let legacy = r#"{"methods": {"Remove": [1]}}"#;
    cache.store().init().unwrap();
    std::fs::write(cache.store().path_for("GSGoal"), legacy).unwrap();

    let maintainer = cache.maintainer(goal_source("\"abc\""));
    let outcome = maintainer.refresh_class("GSGoal", normal()).unwrap();
    assert!(matches!(outcome, RefreshOutcome::Fetched { persisted: true, .. }));
    assert_eq!(maintainer.source().head_count(), 0);
    assert!(cache.store().read("GSGoal").unwrap().headers.is_some());
}

#[test]
fn empty_page_is_not_persisted() {
    let cache = CacheFixture::new();
    let source = MemoryDocSource::new().with_page("classGSSign.html", doc_page(&[]), "\"e\"");
    let maintainer = cache.maintainer(source);

    let outcome = maintainer.refresh_class("GSSign", normal()).unwrap();
    assert_eq!(
        outcome,
        RefreshOutcome::Fetched {
            methods: MethodTable::new(),
            persisted: false,
        }
    );
    assert!(!cache.store().path_for("GSSign").exists());
    assert_eq!(cache.check("GSSign.BuildSign(t, s);").warning_count, 1);
}

#[test]
fn untracked_class_is_rejected() {
    let cache = CacheFixture::new();
    let maintainer = cache.maintainer(MemoryDocSource::new());
    let err = maintainer.refresh_class("GSVehicle", normal()).unwrap_err();
    assert!(matches!(err, DocsError::UnknownClass(ref name) if name == "GSVehicle"));
    assert_eq!(maintainer.source().fetch_count(), 0);
}

#[test]
fn update_all_stops_at_first_failure() {
    let cache = CacheFixture::new();
    let source = MemoryDocSource::new()
        .with_page("classGSNews.html", doc_page(&["static bool GSNews::Create (A a, B b)"]), "1")
        .with_page("classGSCompany.html", doc_page(&["static Money GSCompany::GetBankBalance (CompanyID c)"]), "1");
    let maintainer = cache.maintainer(source);

    let err = maintainer.update_all(normal()).unwrap_err();
    assert!(matches!(err, DocsError::HttpStatus { status: 404, .. }));
    assert!(err.to_string().contains("classGSController.html"));
    assert!(cache.store().path_for("GSNews").exists());
    assert!(cache.store().path_for("GSCompany").exists());
    assert!(!cache.store().path_for("GSDate").exists());
    assert_eq!(maintainer.source().fetch_count(), 3);
}

#[test]
fn update_each_isolates_failures() {
    let cache = CacheFixture::new();
    let source = MemoryDocSource::new();
    for class in tracked_classes().iter().filter(|c| c.name != "GSDate") {
        let signature = format!("static bool {}::IsValid (SQInteger id)", class.name);
        source.set_page(class.doc_page, doc_page(&[signature.as_str()]), "v1");
    }
    let maintainer = cache.maintainer(source);

    let outcomes = maintainer.update_each(normal());
    assert_eq!(outcomes.len(), tracked_classes().len());
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|(_, result)| result.is_err())
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(failed, vec!["GSDate"]);
    assert!(cache.store().path_for("GSStation").exists());
}

#[test]
fn second_run_reuses_everything() {
    let cache = CacheFixture::new();
    let maintainer = cache.maintainer(full_source());
    let first = maintainer.update_all(normal()).unwrap();
    assert!(first
        .iter()
        .all(|(_, outcome)| matches!(outcome, RefreshOutcome::Fetched { persisted: true, .. })));

    let second = maintainer.update_all(normal()).unwrap();
    assert!(second
        .iter()
        .all(|(_, outcome)| matches!(outcome, RefreshOutcome::Reused(_))));
    assert_eq!(maintainer.source().fetch_count(), tracked_classes().len());
}

#[test]
fn maintained_cache_drives_validation() {
    let cache = CacheFixture::new();
    cache.maintainer(full_source()).update_all(normal()).unwrap();

    let script = "\
local goal = GSGoal.New(company, GSText(GSText.STR_GOAL), GSGoal.GT_NONE, 0);
GSGoal.Remove(goal, true);
GSGoal.SetTxt(goal, text);
if (GSTown.IsValid(town)) GSSign.IsValid(1);
";
    let result = cache.check(script);
    let messages: Vec<&str> = result.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages.len(), 2, "{messages:?}");
    assert_eq!(messages[0], "Invalid arity for GSGoal.Remove -> 2 args (allowed: 1)");
    assert!(messages[1].starts_with("GSGoal.SetTxt not found in API documentation"));
    assert_eq!(result.warning_count, 0);
}

#[test]
fn stored_entry_round_trips_through_catalog() {
    let cache = CacheFixture::new();
    let methods: MethodTable = [("GetName", 1), ("GetLocation", 1)].into_iter().collect();
    let headers = ValidationHeaders {
        etag: Some("\"x\"".to_string()),
        ..ValidationHeaders::default()
    };
    let entry = CacheEntry::new("GSTown", methods.clone(), headers, chrono::Utc::now());
    cache.store().write("GSTown", &entry).unwrap();
    assert_eq!(cache.catalog().get("GSTown"), Some(&methods));
}

#[test]
fn legacy_table_layout_is_cached() {
    let markup = r##"<html><body><table class="memberdecls">
<tr class="memitem"><td class="memItemLeft">static bool&#160;</td><td class="memItemRight"><a class="el" href="#a1">IsValidTown</a> (TownID town_id)</td></tr>
<tr class="memitem"><td class="memItemLeft">static char *&#160;</td><td class="memItemRight"><a class="el" href="#a2">GetName</a> (TownID town_id)</td></tr>
<tr class="memitem"><td class="memItemLeft">static SQInteger&#160;</td><td class="memItemRight"><a class="el" href="#a3">GetTownCount</a> ()</td></tr>
</table></body></html>"##;
    let cache = CacheFixture::new();
    let source = MemoryDocSource::new().with_page("classGSTown.html", markup, "\"t1\"");
    cache
        .maintainer(source)
        .refresh_class("GSTown", normal())
        .unwrap();

    let entry = cache.store().read("GSTown").unwrap();
    assert!(entry.methods.allows("IsValidTown", 1));
    assert!(entry.methods.allows("GetName", 1));
    assert!(entry.methods.allows("GetTownCount", 0));
    assert_eq!(cache.check("GSTown.GetName(t, extra);").error_count, 1);
}
