//! Shared error type for fetching and extraction.

use thiserror::Error;

/// Scraper error for URL handling, HTTP, and selector setup.
///
/// The fetch variants carry no notion of which kind of page was requested; the
/// crawl decides whether a failure is fatal (listing) or absorbed (author detail).
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Invalid URL: {input}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Network error: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body from {url}: {source}")]
    BodyRead { url: String, source: reqwest::Error },

    #[error("Invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
}
