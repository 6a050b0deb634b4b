//! Article-number normalization and canonical ordering.
//!
//! Article numbers arrive as free-form tokens: `제80조`, `80`, `제80조의2`,
//! or headings like `부칙` with no digits at all. The leading digit run is
//! the sole sorting and equality key throughout the system.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ArticleRecord;

/// Sort key assigned to tokens without digits, so malformed or heading
/// entries sort after every real article number.
pub const ARTICLE_NO_LAST: u32 = u32::MAX;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Extract the canonical integer key from a free-form article-number token.
///
/// Takes the first run of ASCII digits; prefixes, suffixes, and embedded
/// punctuation are ignored, so `제80조의2` and `80` both map to `80`.
/// Tokens without digits (and digit runs too large for `u32`) map to
/// [`ARTICLE_NO_LAST`].
///
/// # Examples
/// ```
/// use kodex::article::{normalize_article_no, ARTICLE_NO_LAST};
///
/// assert_eq!(normalize_article_no("제80조"), 80);
/// assert_eq!(normalize_article_no("제80조의2"), 80);
/// assert_eq!(normalize_article_no("부칙"), ARTICLE_NO_LAST);
/// ```
#[must_use]
pub fn normalize_article_no(token: &str) -> u32 {
    DIGIT_RUN
        .find(token)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(ARTICLE_NO_LAST)
}

/// Sort records ascending by normalized article number.
///
/// The sort is stable: records that normalize to the same key keep their
/// original relative order.
pub fn sort_by_article_no(records: &mut [ArticleRecord]) {
    records.sort_by_key(|r| normalize_article_no(&r.number));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArticleRole;

    fn record(number: &str) -> ArticleRecord {
        ArticleRecord {
            number: number.to_string(),
            role: ArticleRole::Body,
            title: None,
            content: String::new(),
            effective_date: None,
            previous: None,
            next: None,
        }
    }

    #[test]
    fn test_normalize_plain_number() {
        assert_eq!(normalize_article_no("80"), 80);
        assert_eq!(normalize_article_no("1"), 1);
    }

    #[test]
    fn test_normalize_korean_tokens() {
        assert_eq!(normalize_article_no("제80조"), 80);
        assert_eq!(normalize_article_no("제80조의2"), 80);
        assert_eq!(normalize_article_no("제1조(목적)"), 1);
    }

    #[test]
    fn test_normalize_no_digits_is_sentinel() {
        assert_eq!(normalize_article_no("부칙"), ARTICLE_NO_LAST);
        assert_eq!(normalize_article_no(""), ARTICLE_NO_LAST);
    }

    #[test]
    fn test_sentinel_sorts_after_any_real_number() {
        assert!(normalize_article_no("부칙") > normalize_article_no("제9999조"));
    }

    #[test]
    fn test_normalize_overlong_digit_run_is_sentinel() {
        assert_eq!(normalize_article_no("99999999999999"), ARTICLE_NO_LAST);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut records = vec![record("제3조"), record("제1조"), record("제3조의2"), record("부칙")];
        sort_by_article_no(&mut records);
        let numbers: Vec<&str> = records.iter().map(|r| r.number.as_str()).collect();
        // 제3조 and 제3조의2 both normalize to 3 and keep document order
        assert_eq!(numbers, vec!["제1조", "제3조", "제3조의2", "부칙"]);
    }
}
