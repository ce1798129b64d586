//! Retrieval of documentation pages and their HTTP validation headers.

use std::time::Duration;

use gsapi_cache::ValidationHeaders;
use gsapi_config::DocsConfig;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderName, CACHE_CONTROL, DATE, ETAG, EXPIRES, LAST_MODIFIED};

use crate::error::DocsError;

/// A fetched documentation page.
#[derive(Clone, Debug)]
pub struct FetchedPage {
    /// The page markup.
    pub markup: String,
    /// Validation headers captured from the response.
    pub headers: ValidationHeaders,
}

/// A source of class documentation pages, addressed by page identifier.
pub trait DocSource {
    /// Returns the URL a page identifier resolves to. Used for logging and errors.
    fn url_for(&self, doc_page: &str) -> String;

    /// Fetches the page markup and its validation headers.
    fn fetch(&self, doc_page: &str) -> Result<FetchedPage, DocsError>;

    /// Fetches only the validation headers of the page.
    fn head(&self, doc_page: &str) -> Result<ValidationHeaders, DocsError>;
}

/// Fetches pages over HTTP(S) relative to a base URL.
///
/// No retries. Requests never time out unless a timeout is configured.
#[derive(Clone, Debug)]
pub struct HttpDocSource {
    client: Client,
    base_url: String,
}

impl HttpDocSource {
    /// Creates a source for `base_url` with an optional request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, DocsError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .user_agent(concat!("gsapi/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| DocsError::Network {
                url: base_url.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { client, base_url })
    }

    /// Creates a source from the `[docs]` settings.
    pub fn from_config(config: &DocsConfig) -> Result<Self, DocsError> {
        Self::new(
            config.base_url.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, DocsError> {
        let response = request.send().map_err(|e| DocsError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(DocsError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl DocSource for HttpDocSource {
    fn url_for(&self, doc_page: &str) -> String {
        format!("{}/{}", self.base_url, doc_page)
    }

    fn fetch(&self, doc_page: &str) -> Result<FetchedPage, DocsError> {
        let url = self.url_for(doc_page);
        let response = self.send(self.client.get(&url), &url)?;
        let headers = capture_headers(response.headers());
        let markup = response.text().map_err(|e| DocsError::Network {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        Ok(FetchedPage { markup, headers })
    }

    fn head(&self, doc_page: &str) -> Result<ValidationHeaders, DocsError> {
        let url = self.url_for(doc_page);
        let response = self.send(self.client.head(&url), &url)?;
        Ok(capture_headers(response.headers()))
    }
}

/// Extracts the validation headers from a response header map.
///
/// Headers that are missing, empty, or not valid visible ASCII are absent.
pub fn capture_headers(map: &HeaderMap) -> ValidationHeaders {
    let get = |name: HeaderName| {
        map.get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    ValidationHeaders {
        etag: get(ETAG),
        last_modified: get(LAST_MODIFIED),
        cache_control: get(CACHE_CONTROL),
        expires: get(EXPIRES),
        date: get(DATE),
    }
}
