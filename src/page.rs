//! Fixed-size windows over a sorted article collection.

use serde::Serialize;

use crate::types::ArticleRecord;

/// One window over a canonically ordered article sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Records in this window, in canonical order.
    pub items: Vec<ArticleRecord>,

    /// 1-based index of the first record in the window.
    pub start_index: usize,

    /// 1-based index of the last record, or 0 for an empty window.
    pub end_index: usize,

    /// Length of the whole sequence, independent of the window.
    pub total: usize,
}

impl Page {
    /// True when the window is past the end of the sequence.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice `articles` into the 1-based window starting at `start_index`.
///
/// The input must already be canonically ordered; it is neither mutated nor
/// re-sorted. A `start_index` beyond the sequence yields an empty page with
/// `total` populated so callers can detect exhaustion.
#[must_use]
pub fn paginate(articles: &[ArticleRecord], start_index: usize, count: usize) -> Page {
    let total = articles.len();
    let start = start_index.max(1);

    if start > total || count == 0 {
        return Page {
            items: Vec::new(),
            start_index: start,
            end_index: 0,
            total,
        };
    }

    let end = (start + count - 1).min(total);
    Page {
        items: articles[start - 1..end].to_vec(),
        start_index: start,
        end_index: end,
        total,
    }
}
