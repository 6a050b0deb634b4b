//! Configuration constants and validation functions for the statute reader.

use std::time::Duration;

use crate::error::{KodexError, Result};

/// Base URL of the national law information service (DRF).
pub const LAW_API_URL: &str = "https://www.law.go.kr/DRF/lawService.do";

/// HTTP timeout in seconds.
///
/// Set to 30 seconds to accommodate large statute payloads and slow
/// connections.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default time-to-live for cached documents (7 days).
///
/// Statutes change rarely; a week keeps repeated browsing sessions cheap
/// while still picking up consolidations within a reasonable window.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default number of article previews in a digest.
pub const DEFAULT_PREVIEW_LIMIT: usize = 50;

/// Default window width for article paging.
pub const DEFAULT_PAGE_WIDTH: usize = 20;

/// Upper bound on the paging window width accepted from callers.
pub const MAX_PAGE_WIDTH: usize = 100;

/// Character budget for one article preview in a digest.
pub const PREVIEW_CONTENT_CHARS: usize = 100;

/// Maximum number of revision-rationale fragments carried in a digest.
pub const REVISION_NOTE_LIMIT: usize = 10;

/// Maximum accepted length of a law key (serial number or statute name).
pub const MAX_LAW_KEY_LEN: usize = 128;

/// Text wrap width for CLI article output.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Validate a law key.
///
/// A law key is either a statute serial number (e.g. "248613") or a statute
/// name (e.g. "건축법"); both are resolved by the remote service. The key
/// only needs to be non-empty, printable, and of sane length here.
///
/// # Examples
/// ```
/// use kodex::config::validate_law_key;
///
/// assert!(validate_law_key("248613").is_ok());
/// assert!(validate_law_key("건축법").is_ok());
/// assert!(validate_law_key("").is_err());
/// ```
pub fn validate_law_key(law_key: &str) -> Result<()> {
    let trimmed = law_key.trim();
    if trimmed.is_empty()
        || trimmed.len() > MAX_LAW_KEY_LEN
        || trimmed.chars().any(char::is_control)
    {
        return Err(KodexError::InvalidLawKey(law_key.to_string()));
    }
    Ok(())
}

/// Validate paging arguments before any fetch happens.
///
/// `start_index` is 1-based; `count` must be positive and bounded by
/// [`MAX_PAGE_WIDTH`].
pub fn validate_page_args(start_index: usize, count: usize) -> Result<()> {
    if start_index == 0 {
        return Err(KodexError::InvalidPage(
            "start index is 1-based and must be at least 1".to_string(),
        ));
    }
    if count == 0 {
        return Err(KodexError::InvalidPage(
            "count must be at least 1".to_string(),
        ));
    }
    if count > MAX_PAGE_WIDTH {
        return Err(KodexError::InvalidPage(format!(
            "count must be at most {MAX_PAGE_WIDTH}, got {count}"
        )));
    }
    Ok(())
}
