//! Caller-facing operations: digest, single-article lookup, and paging.
//!
//! `LawService` composes the fetcher, digest builder, locator, and
//! paginator. All collaborators are injected at construction; the service
//! holds no global state, and every operation fetches through the single
//! [`Fetcher`] entry point so the three operations share one cache line per
//! document.

use crate::article::sort_by_article_no;
use crate::config::{
    validate_law_key, validate_page_args, DEFAULT_PAGE_WIDTH, DEFAULT_PREVIEW_LIMIT,
};
use crate::digest::{build_digest, Digest};
use crate::error::{KodexError, Result};
use crate::fetch::{DocumentSource, Fetcher};
use crate::locate::locate_article;
use crate::page::{paginate, Page};
use crate::types::ArticleRecord;

/// Statute reading service.
pub struct LawService<S: DocumentSource> {
    fetcher: Fetcher<S>,
    preview_limit: usize,
    page_width: usize,
}

impl<S: DocumentSource> LawService<S> {
    /// Create a service with explicit digest and paging sizes.
    #[must_use]
    pub fn new(fetcher: Fetcher<S>, preview_limit: usize, page_width: usize) -> Self {
        Self {
            fetcher,
            preview_limit,
            page_width,
        }
    }

    /// Create a service with the default sizes.
    #[must_use]
    pub fn with_defaults(fetcher: Fetcher<S>) -> Self {
        Self::new(fetcher, DEFAULT_PREVIEW_LIMIT, DEFAULT_PAGE_WIDTH)
    }

    /// The underlying fetcher (exposes the cache store for maintenance).
    #[must_use]
    pub fn fetcher(&self) -> &Fetcher<S> {
        &self.fetcher
    }

    /// Default window width used when the caller passes no count.
    #[must_use]
    pub fn page_width(&self) -> usize {
        self.page_width
    }

    /// Build a digest of the document behind `law_key`.
    pub fn digest(&self, law_key: &str, use_cache: bool) -> Result<Digest> {
        validate_law_key(law_key)?;
        let document = self.fetcher.fetch(law_key, use_cache)?;
        Ok(build_digest(&document, self.preview_limit))
    }

    /// Look up a single article by its free-form number token.
    pub fn article(&self, law_key: &str, number: &str, use_cache: bool) -> Result<ArticleRecord> {
        validate_law_key(law_key)?;
        let document = self.fetcher.fetch(law_key, use_cache)?;
        locate_article(&document, number)
            .cloned()
            .ok_or_else(|| KodexError::ArticleNotFound {
                law_key: law_key.to_string(),
                number: number.to_string(),
            })
    }

    /// Return one window of the canonically ordered body articles.
    pub fn article_page(
        &self,
        law_key: &str,
        start_index: usize,
        count: usize,
        use_cache: bool,
    ) -> Result<Page> {
        validate_law_key(law_key)?;
        validate_page_args(start_index, count)?;

        let document = self.fetcher.fetch(law_key, use_cache)?;
        let mut body: Vec<ArticleRecord> = document
            .articles
            .into_iter()
            .filter(|a| a.role.is_body())
            .collect();
        sort_by_article_no(&mut body);

        Ok(paginate(&body, start_index, count))
    }
}
