//! Command-line interface for the statute reader.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::CacheStore;
use crate::config::TEXT_WRAP_WIDTH;
use crate::digest::Digest;
use crate::error::Result;
use crate::fetch::{Fetcher, HttpSource};
use crate::page::Page;
use crate::service::LawService;
use crate::types::ArticleRecord;

/// kodex - fetch, cache, and browse Korean statutes.
#[derive(Parser)]
#[command(name = "kodex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Cache directory
    #[arg(long, global = true, default_value = ".kodex-cache")]
    pub cache_dir: PathBuf,

    /// Cache time-to-live in days
    #[arg(long, global = true, default_value_t = 7)]
    pub ttl_days: u64,

    /// Requester id passed to the law service (OC parameter)
    #[arg(long, global = true, default_value = "test")]
    pub client_id: String,

    /// Bypass the cache and always contact the remote service
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a digest of a statute: metadata, first articles, revision notes.
    Digest {
        /// Statute serial number (e.g. 248613) or statute name (e.g. 건축법)
        law_key: String,
    },

    /// Show a single article by number (e.g. 제50조, 80, 제80조의2).
    Article {
        /// Statute serial number or name
        law_key: String,

        /// Article number token
        number: String,
    },

    /// List one page of a statute's articles.
    Page {
        /// Statute serial number or name
        law_key: String,

        /// 1-based index of the first article in the window
        #[arg(short, long, default_value_t = 1)]
        start: usize,

        /// Window width (default: the service's page width)
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// Remove expired entries from the cache directory.
    Sweep,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let store = CacheStore::new(
        &cli.cache_dir,
        Duration::from_secs(cli.ttl_days * 24 * 60 * 60),
    );
    let use_cache = !cli.no_cache;

    match cli.command {
        Commands::Sweep => {
            let removed = store.sweep();
            println!(
                "{} {} expired cache entries removed",
                style("Swept:").green().bold(),
                removed
            );
        }
        Commands::Digest { law_key } => {
            let service = build_service(store, &cli.client_id)?;
            let digest = with_spinner("Fetching statute...", || service.digest(&law_key, use_cache))?;
            print_digest(&digest);
        }
        Commands::Article { law_key, number } => {
            let service = build_service(store, &cli.client_id)?;
            let article =
                with_spinner("Fetching statute...", || service.article(&law_key, &number, use_cache))?;
            print_article(&article);
        }
        Commands::Page {
            law_key,
            start,
            count,
        } => {
            let service = build_service(store, &cli.client_id)?;
            let count = count.unwrap_or_else(|| service.page_width());
            let page = with_spinner("Fetching statute...", || {
                service.article_page(&law_key, start, count, use_cache)
            })?;
            print_page(&page);
        }
    }

    Ok(())
}

fn build_service(store: CacheStore, client_id: &str) -> Result<LawService<HttpSource>> {
    let source = HttpSource::new(client_id)?;
    Ok(LawService::with_defaults(Fetcher::new(store, source)))
}

/// Run `f` behind a progress spinner, clearing it before returning.
fn with_spinner<T>(message: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = f();
    pb.finish_and_clear();
    result
}

fn print_digest(digest: &Digest) {
    println!(
        "{} {}",
        style(&digest.law_name).cyan().bold(),
        style(&digest.law_type).dim()
    );
    if !digest.serial_no.is_empty() {
        println!("  Serial no: {}", digest.serial_no);
    }
    if !digest.promulgation_date.is_empty() {
        println!(
            "  Promulgated: {} (no. {})",
            style(&digest.promulgation_date).green(),
            digest.promulgation_no
        );
    }
    if !digest.effective_date.is_empty() {
        println!("  Effective: {}", style(&digest.effective_date).green());
    }
    if !digest.ministry.is_empty() {
        println!("  Ministry: {}", digest.ministry);
    }
    println!("  Articles: {}", digest.total_articles);

    if !digest.previews.is_empty() {
        println!();
        println!("{}", style("Articles").bold());
        for preview in &digest.previews {
            let title = preview
                .title
                .as_deref()
                .map(|t| format!(" ({t})"))
                .unwrap_or_default();
            println!(
                "  {}{} {}",
                style(&preview.number).cyan(),
                title,
                preview.excerpt
            );
        }
    }

    if !digest.revision_notes.is_empty() {
        println!();
        println!("{}", style("Revision notes").bold());
        for note in &digest.revision_notes {
            println!("  - {note}");
        }
    }
}

fn print_article(article: &ArticleRecord) {
    match &article.title {
        Some(title) => println!("{} ({})", style(&article.number).cyan().bold(), title),
        None => println!("{}", style(&article.number).cyan().bold()),
    }
    if let Some(date) = &article.effective_date {
        println!("{}", style(format!("Effective: {date}")).dim());
    }
    println!();
    println!("{}", textwrap::fill(&article.content, TEXT_WRAP_WIDTH));
}

fn print_page(page: &Page) {
    if page.is_exhausted() {
        println!(
            "{} (total {} articles)",
            style("No articles in this window").yellow(),
            page.total
        );
        return;
    }

    for article in &page.items {
        let title = article
            .title
            .as_deref()
            .map(|t| format!(" ({t})"))
            .unwrap_or_default();
        println!("{}{}", style(&article.number).cyan(), title);
    }
    println!();
    println!(
        "{} {}-{} of {}",
        style("Showing").dim(),
        page.start_index,
        page.end_index,
        page.total
    );
}
