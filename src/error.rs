//! Error types for the statute reader.
//!
//! Cache I/O failures deliberately do not appear here: the cache is
//! best-effort, so read failures are misses and write failures are no-ops,
//! both handled inside [`crate::cache::CacheStore`].

use thiserror::Error;

/// Main error type for the kodex library.
#[derive(Debug, Error)]
pub enum KodexError {
    /// Invalid law key (serial number or statute name).
    #[error("Invalid law key: '{0}'. Expected a statute serial number (e.g. 248613) or a statute name")]
    InvalidLawKey(String),

    /// Invalid paging window.
    #[error("Invalid page window: {0}")]
    InvalidPage(String),

    /// HTTP client construction or transport failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote fetch failed for a specific document.
    #[error("Failed to fetch document for {law_key}: {source}")]
    Fetch {
        law_key: String,
        #[source]
        source: reqwest::Error,
    },

    /// Remote service answered with a non-success status.
    #[error("Law service returned {status} for {law_key}")]
    Status {
        law_key: String,
        status: reqwest::StatusCode,
    },

    /// Document payload could not be parsed at the top level.
    #[error("Malformed document payload for {law_key}: {source}")]
    MalformedDocument {
        law_key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A specific article does not exist in an otherwise valid document.
    ///
    /// Distinct from fetch failures so callers can suggest a different
    /// article number rather than a retry.
    #[error("Article '{number}' not found in {law_key}")]
    ArticleNotFound { law_key: String, number: String },

    /// IO error outside the cache (e.g. CLI output paths).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for kodex operations.
pub type Result<T> = std::result::Result<T, KodexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_law_key_display() {
        let err = KodexError::InvalidLawKey("".to_string());
        assert!(err.to_string().contains("serial number"));
    }

    #[test]
    fn test_article_not_found_display() {
        let err = KodexError::ArticleNotFound {
            law_key: "248613".to_string(),
            number: "제999조".to_string(),
        };
        assert_eq!(err.to_string(), "Article '제999조' not found in 248613");
    }
}
