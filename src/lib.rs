//! quotescrape: CLI scraper for paginated quote listings, enriched with author profiles, outputting CSV.

pub mod cli;
pub mod config;
pub mod model;
pub mod scraper;
pub mod table;

// Re-exports for CLI and consumers.
pub use crate::model::{AuthorInfo, OutputRow, QuoteFragment};
pub use crate::scraper::{
    crawl, resolve_url, AuthorCache, CrawlOptions, CrawlOutput, CrawlReport, Crawler,
    DetailExtractor, Enrichment, Fetch, ListingExtractor, ListingPage, PoliteClient,
    PoliteClientBuilder, ScraperError,
};
pub use crate::table::{write_csv, TableError};
