//! Crawl loop: follow pagination, extract quotes, and join each with its author's profile.
//!
//! A failed listing page aborts the crawl. A failed author page only costs that row its
//! author fields; the row is still emitted and the crawl continues.

use crate::model::{AuthorInfo, OutputRow, QuoteFragment};
use crate::scraper::cache::AuthorCache;
use crate::scraper::detail::DetailExtractor;
use crate::scraper::error::ScraperError;
use crate::scraper::listing::ListingExtractor;
use crate::scraper::{validate_base_url, Fetch};

/// Options for a crawl run.
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    /// Stop after this many listing pages. `None` follows pagination to the end.
    pub max_pages: Option<u32>,
}

/// How a quote's author fields were filled.
#[derive(Debug)]
pub enum Enrichment {
    /// Profile fetched now or earlier in the run.
    Resolved(AuthorInfo),
    /// The record has no author link; nothing was fetched.
    NoLink,
    /// The profile fetch failed; the row gets empty author fields.
    Absorbed(ScraperError),
}

impl Enrichment {
    pub fn into_author(self) -> AuthorInfo {
        match self {
            Enrichment::Resolved(info) => info,
            Enrichment::NoLink | Enrichment::Absorbed(_) => AuthorInfo::default(),
        }
    }
}

/// Counters collected during a crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub pages: u32,
    pub authors_fetched: usize,
    pub cache_hits: u32,
    pub absorbed_failures: u32,
}

/// Rows in discovery order plus the run's counters.
#[derive(Debug, Clone)]
pub struct CrawlOutput {
    pub rows: Vec<OutputRow>,
    pub report: CrawlReport,
}

/// Drives one crawl. Owns the author cache for the lifetime of the run.
pub struct Crawler<'a, F: Fetch + ?Sized> {
    fetcher: &'a mut F,
    listing: ListingExtractor,
    cache: AuthorCache,
    start_url: String,
}

impl<'a, F: Fetch + ?Sized> Crawler<'a, F> {
    /// `base_url` is both the first listing page and the root relative links resolve against.
    pub fn new(fetcher: &'a mut F, base_url: &str) -> Result<Self, ScraperError> {
        let base = validate_base_url(base_url)?;
        Ok(Self {
            fetcher,
            listing: ListingExtractor::new(base)?,
            cache: AuthorCache::new(DetailExtractor::new()?),
            start_url: base_url.to_string(),
        })
    }

    pub fn cache(&self) -> &AuthorCache {
        &self.cache
    }

    /// Fill in author data for one quote. Never fails; fetch errors become [Enrichment::Absorbed].
    pub fn enrich(&mut self, fragment: &QuoteFragment) -> Enrichment {
        if fragment.author_detail_url.is_empty() {
            return Enrichment::NoLink;
        }
        match self
            .cache
            .resolve(&mut *self.fetcher, &fragment.author_detail_url)
        {
            Ok(info) => Enrichment::Resolved(info),
            Err(e) => Enrichment::Absorbed(e),
        }
    }

    /// Follow pagination from the start URL until no next link remains.
    pub fn run(&mut self, options: &CrawlOptions) -> Result<CrawlOutput, ScraperError> {
        let mut rows = Vec::new();
        let mut report = CrawlReport::default();
        let mut cursor = Some(self.start_url.clone());

        while let Some(url) = cursor.take() {
            if options.max_pages.is_some_and(|max| report.pages >= max) {
                tracing::info!(pages = report.pages, next = %url, "page limit reached");
                break;
            }
            let html = self.fetcher.fetch(&url).map_err(|e| {
                tracing::error!(url = %url, error = %e, "listing page failed, aborting crawl");
                e
            })?;
            report.pages += 1;

            let page = self.listing.extract_html(&html);
            tracing::info!(
                page = report.pages,
                url = %url,
                quotes = page.quotes.len(),
                "scraped listing page"
            );

            for fragment in page.quotes {
                let enrichment = self.enrich(&fragment);
                if let Enrichment::Absorbed(ref e) = enrichment {
                    report.absorbed_failures += 1;
                    tracing::warn!(
                        author_url = %fragment.author_detail_url,
                        error = %e,
                        "failed to fetch author page; author fields left empty"
                    );
                }
                rows.push(OutputRow::join(fragment, enrichment.into_author()));
            }

            cursor = page.next_url;
        }

        report.authors_fetched = self.cache.len();
        report.cache_hits = self.cache.hits();
        tracing::info!(
            rows = rows.len(),
            pages = report.pages,
            authors = report.authors_fetched,
            failed_authors = report.absorbed_failures,
            "crawl finished"
        );
        Ok(CrawlOutput { rows, report })
    }
}

/// Crawl every listing page reachable from `base_url` and return the joined rows.
pub fn crawl<F: Fetch + ?Sized>(
    fetcher: &mut F,
    base_url: &str,
    options: &CrawlOptions,
) -> Result<CrawlOutput, ScraperError> {
    Crawler::new(fetcher, base_url)?.run(options)
}
