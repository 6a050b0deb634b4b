//! Digest construction: a size-bounded summary of one document.
//!
//! A digest is derived fresh from the (possibly cached) document on every
//! request; it carries the metadata, a capped list of article previews, and
//! a capped list of revision-rationale fragments.

use serde::Serialize;

use crate::article::normalize_article_no;
use crate::config::{PREVIEW_CONTENT_CHARS, REVISION_NOTE_LIMIT};
use crate::types::{ArticleRecord, LawDocument};

/// Marker appended when preview content is cut at the character budget.
const TRUNCATION_MARKER: &str = "…";

/// One article preview inside a digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticlePreview {
    /// Raw article-number token.
    pub number: String,

    /// Article title, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Content truncated to the preview budget.
    pub excerpt: String,
}

/// Size-bounded summary of a statute document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Digest {
    pub law_name: String,
    pub law_id: String,
    pub serial_no: String,
    pub law_type: String,
    pub promulgation_date: String,
    pub promulgation_no: String,
    pub effective_date: String,
    pub ministry: String,

    /// Count of body articles in the whole document, independent of the
    /// preview cap.
    pub total_articles: usize,

    /// First articles in canonical order, truncated.
    pub previews: Vec<ArticlePreview>,

    /// Revision-rationale fragments, capped.
    pub revision_notes: Vec<String>,
}

/// Normalize an 8-digit compact date (`20240717`) to `2024-07-17`.
///
/// Anything that is not exactly eight ASCII digits passes through
/// unchanged.
#[must_use]
pub fn normalize_compact_date(date: &str) -> String {
    if date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..8])
    } else {
        date.to_string()
    }
}

/// Truncate to a character budget, appending the marker when cut.
fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => format!("{}{TRUNCATION_MARKER}", &text[..idx]),
        None => text.to_string(),
    }
}

/// Build a digest from a document.
///
/// Only body records count and appear in previews; the preview list is
/// sorted ascending by normalized article number with ties keeping document
/// order. Missing optional fields yield empty fields, never an error.
#[must_use]
pub fn build_digest(document: &LawDocument, preview_limit: usize) -> Digest {
    let mut body: Vec<&ArticleRecord> = document
        .articles
        .iter()
        .filter(|a| a.role.is_body())
        .collect();
    body.sort_by_key(|a| normalize_article_no(&a.number));

    let total_articles = body.len();
    let previews = body
        .iter()
        .take(preview_limit)
        .map(|a| ArticlePreview {
            number: a.number.clone(),
            title: a.title.clone(),
            excerpt: truncate_chars(a.content.trim(), PREVIEW_CONTENT_CHARS),
        })
        .collect();

    let revision_notes = document
        .revision_notes
        .iter()
        .take(REVISION_NOTE_LIMIT)
        .cloned()
        .collect();

    let m = &document.metadata;
    Digest {
        law_name: m.law_name.clone(),
        law_id: m.law_id.clone(),
        serial_no: m.serial_no.clone(),
        law_type: m.law_type.clone(),
        promulgation_date: normalize_compact_date(&m.promulgation_date),
        promulgation_no: m.promulgation_no.clone(),
        effective_date: normalize_compact_date(&m.effective_date),
        ministry: m.ministry.clone(),
        total_articles,
        previews,
        revision_notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArticleRole, LawMetadata};
    use pretty_assertions::assert_eq;

    fn body_article(number: &str, content: &str) -> ArticleRecord {
        ArticleRecord {
            number: number.to_string(),
            role: ArticleRole::Body,
            title: None,
            content: content.to_string(),
            effective_date: None,
            previous: None,
            next: None,
        }
    }

    fn preamble_article(number: &str) -> ArticleRecord {
        ArticleRecord {
            role: ArticleRole::Preamble,
            ..body_article(number, "")
        }
    }

    #[test]
    fn test_digest_counts_and_caps_body_articles() {
        let mut document = LawDocument::default();
        for i in 1..=214 {
            document.articles.push(body_article(&format!("제{i}조"), "내용"));
        }

        let digest = build_digest(&document, 50);
        assert_eq!(digest.previews.len(), 50);
        assert_eq!(digest.total_articles, 214);
    }

    #[test]
    fn test_digest_sorts_and_skips_preambles() {
        let document = LawDocument {
            articles: vec![
                body_article("제3조", "셋"),
                preamble_article("제1조"),
                body_article("제1조", "하나"),
                body_article("제2조", "둘"),
            ],
            ..LawDocument::default()
        };

        let digest = build_digest(&document, 10);
        let numbers: Vec<&str> = digest.previews.iter().map(|p| p.number.as_str()).collect();
        assert_eq!(numbers, vec!["제1조", "제2조", "제3조"]);
        assert_eq!(digest.total_articles, 3);
    }

    #[test]
    fn test_digest_duplicate_numbers_keep_document_order() {
        let document = LawDocument {
            articles: vec![
                body_article("제2조", "본래"),
                body_article("제2조의2", "가지"),
            ],
            ..LawDocument::default()
        };

        let digest = build_digest(&document, 10);
        assert_eq!(digest.previews[0].excerpt, "본래");
        assert_eq!(digest.previews[1].excerpt, "가지");
    }

    #[test]
    fn test_digest_truncates_long_content() {
        let long = "가".repeat(150);
        let document = LawDocument {
            articles: vec![body_article("제1조", &long)],
            ..LawDocument::default()
        };

        let digest = build_digest(&document, 10);
        let excerpt = &digest.previews[0].excerpt;
        assert!(excerpt.ends_with('…'));
        assert_eq!(excerpt.chars().count(), PREVIEW_CONTENT_CHARS + 1);
    }

    #[test]
    fn test_digest_short_content_not_truncated() {
        let document = LawDocument {
            articles: vec![body_article("제1조", "짧은 내용")],
            ..LawDocument::default()
        };

        let digest = build_digest(&document, 10);
        assert_eq!(digest.previews[0].excerpt, "짧은 내용");
    }

    #[test]
    fn test_digest_normalizes_compact_dates() {
        let document = LawDocument {
            metadata: LawMetadata {
                promulgation_date: "20240116".to_string(),
                effective_date: "20240717".to_string(),
                ..LawMetadata::default()
            },
            ..LawDocument::default()
        };

        let digest = build_digest(&document, 10);
        assert_eq!(digest.promulgation_date, "2024-01-16");
        assert_eq!(digest.effective_date, "2024-07-17");
    }

    #[test]
    fn test_digest_caps_revision_notes() {
        let document = LawDocument {
            revision_notes: (0..20).map(|i| format!("개정 이유 {i}")).collect(),
            ..LawDocument::default()
        };

        let digest = build_digest(&document, 10);
        assert_eq!(digest.revision_notes.len(), REVISION_NOTE_LIMIT);
    }

    #[test]
    fn test_digest_of_empty_document_is_all_defaults() {
        let digest = build_digest(&LawDocument::default(), 10);
        assert_eq!(digest.law_name, "");
        assert_eq!(digest.total_articles, 0);
        assert!(digest.previews.is_empty());
        assert!(digest.revision_notes.is_empty());
    }

    #[test]
    fn test_normalize_compact_date_passthrough() {
        assert_eq!(normalize_compact_date("2024-07-17"), "2024-07-17");
        assert_eq!(normalize_compact_date(""), "");
        assert_eq!(normalize_compact_date("2024071"), "2024071");
        assert_eq!(normalize_compact_date("시행일 미정"), "시행일 미정");
    }
}
