//! Document fetching: cache-first, falling through to the remote service.
//!
//! All higher-level operations (digest, article lookup, paging) fetch
//! through [`Fetcher::fetch`], so the same law key always maps to the same
//! cache line within the TTL window.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::cache::{CacheKey, CacheStore};
use crate::config::{HTTP_TIMEOUT_SECS, LAW_API_URL};
use crate::error::{KodexError, Result};
use crate::types::LawDocument;

/// Section label for the full-document cache line.
const DOCUMENT_SECTION: &str = "law";

/// User agent string identifying this client.
const USER_AGENT: &str = concat!("kodex/", env!("CARGO_PKG_VERSION"));

/// A remote collaborator resolving a law key to a raw document payload.
///
/// One idempotent attempt per call. Retries and timeouts are the
/// implementation's concern; callers never retry.
pub trait DocumentSource {
    /// Fetch the raw payload for `law_key`.
    fn fetch_raw(&self, law_key: &str) -> Result<String>;
}

/// HTTP source backed by the national law information service.
pub struct HttpSource {
    client: Client,
    base_url: String,
    client_id: String,
}

impl HttpSource {
    /// Create a source against the production service URL.
    ///
    /// `client_id` is the requester id (OC parameter) registered with the
    /// law service.
    pub fn new(client_id: impl Into<String>) -> Result<Self> {
        Self::with_base_url(client_id, LAW_API_URL)
    }

    /// Create a source against a custom base URL.
    pub fn with_base_url(client_id: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            client_id: client_id.into(),
        })
    }

    /// Build the service URL for a law key.
    ///
    /// Numeric keys are consolidation serial numbers (MST); anything else
    /// is sent as a statute name (LM).
    fn service_url(&self, law_key: &str) -> String {
        let key = law_key.trim();
        let param = if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
            "MST"
        } else {
            "LM"
        };
        format!(
            "{}?OC={}&target=law&type=JSON&{}={}",
            self.base_url, self.client_id, param, key
        )
    }
}

impl DocumentSource for HttpSource {
    fn fetch_raw(&self, law_key: &str) -> Result<String> {
        let url = self.service_url(law_key);
        tracing::debug!(url = %url, "requesting document");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| KodexError::Fetch {
                law_key: law_key.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(KodexError::Status {
                law_key: law_key.to_string(),
                status,
            });
        }

        response.text().map_err(|source| KodexError::Fetch {
            law_key: law_key.to_string(),
            source,
        })
    }
}

/// Cache-first document fetcher.
pub struct Fetcher<S: DocumentSource> {
    store: CacheStore,
    source: S,
}

impl<S: DocumentSource> Fetcher<S> {
    /// Create a fetcher over an explicit store and source.
    #[must_use]
    pub fn new(store: CacheStore, source: S) -> Self {
        Self { store, source }
    }

    /// The underlying cache store (for maintenance such as sweeping).
    #[must_use]
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// The underlying document source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and parse the document behind `law_key`.
    ///
    /// With `use_cache`, a fresh cache entry short-circuits the remote
    /// call. On a miss the raw payload is stored before parsing, so the
    /// next request within the TTL window is served from disk.
    pub fn fetch(&self, law_key: &str, use_cache: bool) -> Result<LawDocument> {
        let key = CacheKey::new(law_key, DOCUMENT_SECTION);

        if use_cache {
            if let Some(payload) = self.store.get(&key) {
                tracing::debug!(law_key, "cache hit");
                return parse_document(law_key, &payload);
            }
        }

        tracing::debug!(law_key, "cache miss, contacting law service");
        let payload = self.source.fetch_raw(law_key)?;
        self.store.put(&key, &payload);
        parse_document(law_key, &payload)
    }
}

fn parse_document(law_key: &str, payload: &str) -> Result<LawDocument> {
    LawDocument::from_json(payload).map_err(|source| KodexError::MalformedDocument {
        law_key: law_key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CACHE_TTL;
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Source that counts invocations and replies with a canned payload.
    struct CountingSource {
        payload: String,
        calls: RefCell<usize>,
    }

    impl CountingSource {
        fn new(payload: &str) -> Self {
            Self {
                payload: payload.to_string(),
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl DocumentSource for CountingSource {
        fn fetch_raw(&self, _law_key: &str) -> Result<String> {
            *self.calls.borrow_mut() += 1;
            Ok(self.payload.clone())
        }
    }

    const PAYLOAD: &str = r#"{"law": {"basic_info": {"law_name": "건축법"}}}"#;

    #[test]
    fn test_second_fetch_hits_cache() {
        let dir = tempdir().unwrap();
        let fetcher = Fetcher::new(
            CacheStore::new(dir.path(), DEFAULT_CACHE_TTL),
            CountingSource::new(PAYLOAD),
        );

        fetcher.fetch("248613", true).unwrap();
        let document = fetcher.fetch("248613", true).unwrap();

        assert_eq!(document.metadata.law_name, "건축법");
        assert_eq!(fetcher.source.calls(), 1);
    }

    #[test]
    fn test_bypassing_cache_contacts_remote_each_time() {
        let dir = tempdir().unwrap();
        let fetcher = Fetcher::new(
            CacheStore::new(dir.path(), DEFAULT_CACHE_TTL),
            CountingSource::new(PAYLOAD),
        );

        fetcher.fetch("248613", false).unwrap();
        fetcher.fetch("248613", false).unwrap();
        assert_eq!(fetcher.source.calls(), 2);
    }

    #[test]
    fn test_distinct_keys_get_distinct_cache_lines() {
        let dir = tempdir().unwrap();
        let fetcher = Fetcher::new(
            CacheStore::new(dir.path(), DEFAULT_CACHE_TTL),
            CountingSource::new(PAYLOAD),
        );

        fetcher.fetch("248613", true).unwrap();
        fetcher.fetch("100001", true).unwrap();
        assert_eq!(fetcher.source.calls(), 2);
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let dir = tempdir().unwrap();
        let fetcher = Fetcher::new(
            CacheStore::new(dir.path(), DEFAULT_CACHE_TTL),
            CountingSource::new("<html>not json</html>"),
        );

        let err = fetcher.fetch("248613", true).unwrap_err();
        assert!(matches!(err, KodexError::MalformedDocument { .. }));
    }

    #[test]
    fn test_service_url_selects_parameter_by_key_shape() {
        let source = HttpSource::with_base_url("test", "http://localhost:9").unwrap();
        assert_eq!(
            source.service_url("248613"),
            "http://localhost:9?OC=test&target=law&type=JSON&MST=248613"
        );
        assert_eq!(
            source.service_url("건축법"),
            "http://localhost:9?OC=test&target=law&type=JSON&LM=건축법"
        );
    }
}
