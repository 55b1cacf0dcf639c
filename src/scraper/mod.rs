//! Fetching and extraction. Fetch trait, shared client, page extractors, author cache, and the crawl.

mod cache;
mod client;
mod crawl;
mod detail;
mod error;
mod listing;

pub use cache::AuthorCache;
pub use client::{PoliteClient, PoliteClientBuilder};
pub use crawl::{crawl, CrawlOptions, CrawlOutput, CrawlReport, Crawler, Enrichment};
pub use detail::DetailExtractor;
pub use error::ScraperError;
pub use listing::{ListingExtractor, ListingPage};

pub(crate) use client::{DEFAULT_DELAY_SECS, DEFAULT_TIMEOUT_SECS};

use reqwest::Url;
use scraper::{ElementRef, Selector};

/// Site crawled when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://quotes.toscrape.com";

/// Turns a URL into page content. One attempt per call.
///
/// [PoliteClient] is the network implementation; tests substitute in-memory fakes.
pub trait Fetch {
    fn fetch(&mut self, url: &str) -> Result<String, ScraperError>;
}

/// Check that `input` is an absolute http(s) URL usable as a crawl start.
pub fn validate_base_url(input: &str) -> Result<Url, ScraperError> {
    let url = Url::parse(input).map_err(|e| ScraperError::InvalidUrl {
        input: input.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ScraperError::InvalidUrl {
                input: input.to_string(),
                reason: format!("unsupported scheme '{}'", other),
            })
        }
    }
    if url.host_str().is_none() {
        return Err(ScraperError::InvalidUrl {
            input: input.to_string(),
            reason: "URL has no host".to_string(),
        });
    }
    Ok(url)
}

/// Resolve a link href against the site base.
///
/// Trailing slashes are stripped from every href, absolute or relative, so `/author/x/` and
/// `https://site/author/x/` name the same page. Relative hrefs are joined onto `base` the way a
/// browser would: root-relative ones against the origin, others against the base path.
/// Blank hrefs yield `None`.
pub fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let trimmed = match href.trim_end_matches('/') {
        "" => "/",
        t => t,
    };
    if Url::parse(trimmed).is_ok() {
        return Some(trimmed.to_string());
    }
    base.join(trimmed).ok().map(String::from)
}

/// Parse a CSS selector or return a selector error (avoids panics from Selector::parse).
pub(crate) fn parse_selector(sel: &str) -> Result<Selector, ScraperError> {
    Selector::parse(sel).map_err(|e| ScraperError::Selector {
        selector: sel.to_string(),
        reason: e.to_string(),
    })
}

/// Trimmed text of the first element under `scope` matching `sel`, if any.
pub(crate) fn select_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope
        .select(sel)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
}

/// `href` of the first element under `scope` matching `sel`, if present.
pub(crate) fn select_href<'a>(scope: ElementRef<'a>, sel: &Selector) -> Option<&'a str> {
    scope
        .select(sel)
        .next()
        .and_then(|e| e.value().attr("href"))
}
