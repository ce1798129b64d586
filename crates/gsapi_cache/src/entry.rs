//! The persisted record for one class and the HTTP headers it was validated with.

use chrono::{DateTime, Utc};
use gsapi_common::MethodTable;
use serde::{Deserialize, Serialize};

/// HTTP response metadata used to decide whether a cached page is stale.
///
/// Values are kept as opaque strings. Only `cache-control` (for `max-age`) and
/// `date` are ever interpreted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationHeaders {
    /// The `ETag` header.
    #[serde(default)]
    pub etag: Option<String>,
    /// The `Last-Modified` header.
    #[serde(default, rename = "last-modified")]
    pub last_modified: Option<String>,
    /// The `Cache-Control` header.
    #[serde(default, rename = "cache-control")]
    pub cache_control: Option<String>,
    /// The `Expires` header. Persisted but not consulted.
    #[serde(default)]
    pub expires: Option<String>,
    /// The `Date` header of the response.
    #[serde(default)]
    pub date: Option<String>,
}

impl ValidationHeaders {
    /// Returns the `max-age` directive of `cache-control`, in seconds.
    pub fn max_age(&self) -> Option<u64> {
        let value = self.cache_control.as_deref()?;
        let start = value.find("max-age=")? + "max-age=".len();
        let digits: String = value[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// Returns `true` if no header was captured at all.
    pub fn is_empty(&self) -> bool {
        self.etag.is_none()
            && self.last_modified.is_none()
            && self.cache_control.is_none()
            && self.expires.is_none()
            && self.date.is_none()
    }
}

/// The cached documentation of one tracked class.
///
/// Serialized as `{"methods": {...}, "headers": {...}, "cached_at": "..."}`.
/// Files written before headers were recorded only contain `methods`; they
/// still load, with `headers` and `cached_at` absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The class this entry documents. Derived from the file name, not stored.
    #[serde(skip)]
    pub class_name: String,
    /// Documented methods and their overload arities.
    #[serde(default)]
    pub methods: MethodTable,
    /// Validation headers of the page the table was parsed from.
    #[serde(default)]
    pub headers: Option<ValidationHeaders>,
    /// When the page was fetched and parsed.
    #[serde(default)]
    pub cached_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Creates an entry stamped with the given fetch time.
    pub fn new(
        class_name: impl Into<String>,
        methods: MethodTable,
        headers: ValidationHeaders,
        cached_at: DateTime<Utc>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            methods,
            headers: Some(headers),
            cached_at: Some(cached_at),
        }
    }

    /// Returns `true` if the entry documents at least one method.
    ///
    /// Entries without methods are treated by every consumer as if absent.
    pub fn is_usable(&self) -> bool {
        !self.methods.is_empty()
    }
}
