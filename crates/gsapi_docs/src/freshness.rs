//! Staleness decisions for cached documentation pages.

use chrono::{DateTime, NaiveDateTime, Utc};
use gsapi_cache::ValidationHeaders;

/// The state of a cached page relative to the live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    /// The cached page is current.
    Fresh,
    /// The live page has changed or the cached one has expired.
    Stale,
    /// There is not enough information to decide.
    Unknown,
}

impl Freshness {
    /// Returns `true` unless the cached page is known to be current.
    pub fn needs_refresh(self) -> bool {
        self != Freshness::Fresh
    }
}

/// Compares cached validation headers with the live ones.
///
/// The first applicable rule decides:
///
/// 1. no cached headers: [`Freshness::Unknown`]
/// 2. both sides carry an `ETag`: stale iff they differ
/// 3. both sides carry `Last-Modified`: stale iff they differ
/// 4. the live `Cache-Control` has `max-age=N`: stale iff more than `N`
///    seconds passed between the cached `Date` and `now` (a missing or
///    unparseable cached date counts as the Unix epoch)
/// 5. otherwise [`Freshness::Unknown`]
pub fn assess(
    cached: Option<&ValidationHeaders>,
    live: &ValidationHeaders,
    now: DateTime<Utc>,
) -> Freshness {
    let Some(cached) = cached else {
        return Freshness::Unknown;
    };

    if let (Some(old), Some(new)) = (present(&cached.etag), present(&live.etag)) {
        return changed(old, new);
    }
    if let (Some(old), Some(new)) = (present(&cached.last_modified), present(&live.last_modified)) {
        return changed(old, new);
    }
    if let Some(max_age) = live.max_age() {
        let cached_date = cached
            .date
            .as_deref()
            .and_then(parse_http_date)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let elapsed_ms = i128::from((now - cached_date).num_milliseconds());
        return if elapsed_ms > i128::from(max_age) * 1000 {
            Freshness::Stale
        } else {
            Freshness::Fresh
        };
    }
    Freshness::Unknown
}

/// Returns `true` if the cached page must be fetched again.
pub fn needs_refresh(
    cached: Option<&ValidationHeaders>,
    live: &ValidationHeaders,
    now: DateTime<Utc>,
) -> bool {
    assess(cached, live, now).needs_refresh()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn changed(old: &str, new: &str) -> Freshness {
    if old == new {
        Freshness::Fresh
    } else {
        Freshness::Stale
    }
}

/// Obsolete HTTP-date forms: RFC 850 and asctime. Both are always GMT.
const OBSOLETE_DATE_FORMATS: &[&str] = &["%A, %d-%b-%y %H:%M:%S GMT", "%a %b %e %H:%M:%S %Y"];

fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) =
        DateTime::parse_from_rfc2822(value).or_else(|_| DateTime::parse_from_rfc3339(value))
    {
        return Some(date.with_timezone(&Utc));
    }
    OBSOLETE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}
