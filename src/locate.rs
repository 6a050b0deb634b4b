//! Single-article lookup with preamble/body disambiguation.

use crate::article::normalize_article_no;
use crate::types::{ArticleRecord, ArticleRole, LawDocument};

/// Find the article whose normalized number matches `requested`.
///
/// Scans in document order. When the first match is a preamble record, the
/// authoritative body record usually follows immediately under the same
/// nominal number; the first body record with the same number anywhere
/// after the preamble is returned (best-effort for the non-adjacent case).
/// A preamble with no later body record is returned as-is.
///
/// Returns `None` when no record matches — "article absent" is not an
/// error, and callers distinguish it from fetch failures.
#[must_use]
pub fn locate_article<'a>(document: &'a LawDocument, requested: &str) -> Option<&'a ArticleRecord> {
    let want = normalize_article_no(requested);
    let articles = &document.articles;

    let (idx, first) = articles
        .iter()
        .enumerate()
        .find(|(_, a)| normalize_article_no(&a.number) == want)?;

    if first.role == ArticleRole::Body {
        return Some(first);
    }

    articles[idx + 1..]
        .iter()
        .find(|a| a.role == ArticleRole::Body && normalize_article_no(&a.number) == want)
        .or(Some(first))
}
