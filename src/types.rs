//! Core data types for statute documents.
//!
//! The remote service is loose about container shape: a collection holding
//! one element may arrive as a bare object instead of a list, and optional
//! sections are simply absent. The wire model captures that with
//! [`OneOrMany`] and collapses everything to uniform `Vec`s in
//! [`LawDocument`], so downstream components never see the irregularity.

use serde::{Deserialize, Serialize};

use crate::text::normalize_text;

/// Role of a record within a document's article collection.
///
/// A heading record may precede the body record under the same nominal
/// number; only the body record carries authoritative content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleRole {
    /// Authoritative article text.
    #[default]
    Body,

    /// Preamble or heading record paired with a body record.
    Preamble,
}

impl ArticleRole {
    /// True for records carrying authoritative article text.
    #[must_use]
    pub fn is_body(self) -> bool {
        matches!(self, Self::Body)
    }
}

/// A single entry in a document's article collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Raw article-number token (e.g. "제80조", "제80조의2", "부칙").
    pub number: String,

    /// Body or preamble/heading.
    #[serde(default)]
    pub role: ArticleRole,

    /// Article title, when the statute names its articles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Article text.
    #[serde(default)]
    pub content: String,

    /// Per-article effective date override (compact 8-digit form).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,

    /// Token of the preceding article, when the service links them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,

    /// Token of the following article, when the service links them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Metadata block of a statute document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawMetadata {
    /// Statute name (e.g. "건축법").
    #[serde(default)]
    pub law_name: String,

    /// Stable law identifier.
    #[serde(default)]
    pub law_id: String,

    /// Serial number of this consolidation (MST).
    #[serde(default)]
    pub serial_no: String,

    /// Kind of statute (법률, 대통령령, ...).
    #[serde(default)]
    pub law_type: String,

    /// Promulgation date, compact 8-digit form.
    #[serde(default)]
    pub promulgation_date: String,

    /// Promulgation number.
    #[serde(default)]
    pub promulgation_no: String,

    /// Effective date, compact 8-digit form.
    #[serde(default)]
    pub effective_date: String,

    /// Issuing ministry.
    #[serde(default)]
    pub ministry: String,
}

/// Canonical statute document: metadata plus a uniform article list.
///
/// Created at the ingestion boundary via [`LawDocument::from_json`];
/// immutable for the lifetime of its cache entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LawDocument {
    pub metadata: LawMetadata,
    pub articles: Vec<ArticleRecord>,
    pub revision_notes: Vec<String>,
}

impl LawDocument {
    /// Parse a raw service payload into a canonical document.
    ///
    /// Missing containers (no articles, no revision section) degrade to
    /// empty lists; only a wholesale-unparsable payload is an error.
    pub fn from_json(payload: &str) -> std::result::Result<Self, serde_json::Error> {
        let envelope: RawEnvelope = serde_json::from_str(payload)?;
        Ok(envelope.into_document())
    }
}

/// A container the service serves as either a single object or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Proper list.
    Many(Vec<T>),
    /// Single bare object standing in for a one-element list.
    One(T),
}

impl<T> OneOrMany<T> {
    /// Collapse to a plain `Vec`.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Top-level wire envelope.
#[derive(Debug, Default, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    law: Option<RawLaw>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLaw {
    #[serde(default)]
    basic_info: LawMetadata,

    #[serde(default)]
    articles: Option<RawArticles>,

    #[serde(default)]
    revision: Option<RawRevision>,
}

#[derive(Debug, Default, Deserialize)]
struct RawArticles {
    #[serde(default)]
    unit: Option<OneOrMany<ArticleRecord>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRevision {
    #[serde(default)]
    reason: Option<OneOrMany<String>>,
}

impl RawEnvelope {
    /// Collapse the wire shape into the canonical document.
    fn into_document(self) -> LawDocument {
        let raw = self.law.unwrap_or_default();

        let mut articles: Vec<ArticleRecord> = raw
            .articles
            .and_then(|a| a.unit)
            .map(OneOrMany::into_vec)
            .unwrap_or_default();
        for article in &mut articles {
            article.content = normalize_text(&article.content);
            if let Some(title) = article.title.take() {
                let title = normalize_text(&title);
                if !title.is_empty() {
                    article.title = Some(title);
                }
            }
        }

        let revision_notes = raw
            .revision
            .and_then(|r| r.reason)
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .iter()
            .map(|note| normalize_text(note))
            .filter(|note| !note.is_empty())
            .collect();

        LawDocument {
            metadata: raw.basic_info,
            articles,
            revision_notes,
        }
    }
}
