//! Listing page extraction: quote records and the pagination link.

use crate::model::QuoteFragment;
use crate::scraper::error::ScraperError;
use crate::scraper::{parse_selector, resolve_url, select_href, select_text};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

/// Quotes found on one listing page and the next page to visit, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub quotes: Vec<QuoteFragment>,
    pub next_url: Option<String>,
}

/// Extracts [QuoteFragment]s from listing pages. Selectors are compiled once per crawl.
///
/// Every field is optional: a missing element yields an empty string (or empty tag list),
/// never an error.
#[derive(Debug)]
pub struct ListingExtractor {
    base_url: Url,
    quote: Selector,
    text: Selector,
    author: Selector,
    author_link: Selector,
    tag: Selector,
    next: Selector,
}

impl ListingExtractor {
    /// `base_url` is the site root that relative author and pagination links resolve against.
    pub fn new(base_url: Url) -> Result<Self, ScraperError> {
        Ok(Self {
            base_url,
            quote: parse_selector("div.quote")?,
            text: parse_selector("span.text")?,
            author: parse_selector("small.author")?,
            author_link: parse_selector("a[href*='/author/']")?,
            tag: parse_selector("div.tags a.tag")?,
            next: parse_selector("li.next a")?,
        })
    }

    pub fn extract(&self, doc: &Html) -> ListingPage {
        let root = doc.root_element();
        let quotes = root
            .select(&self.quote)
            .map(|record| self.extract_record(record))
            .collect();
        let next_url =
            select_href(root, &self.next).and_then(|href| resolve_url(&self.base_url, href));
        ListingPage { quotes, next_url }
    }

    /// Parse `html` as a document and extract it.
    pub fn extract_html(&self, html: &str) -> ListingPage {
        self.extract(&Html::parse_document(html))
    }

    fn extract_record(&self, record: ElementRef<'_>) -> QuoteFragment {
        let text = select_text(record, &self.text)
            .map(|t| strip_quote_marks(&t).to_string())
            .unwrap_or_default();
        let author_display_name = select_text(record, &self.author).unwrap_or_default();
        let author_detail_url = select_href(record, &self.author_link)
            .and_then(|href| resolve_url(&self.base_url, href))
            .unwrap_or_default();
        let tags = record
            .select(&self.tag)
            .map(|t| t.text().collect::<String>().trim().to_string())
            .collect();
        QuoteFragment {
            text,
            author_display_name,
            tags,
            author_detail_url,
        }
    }
}

/// Strip one opening and one closing quotation mark (straight or curly), if present.
fn strip_quote_marks(s: &str) -> &str {
    let s = s
        .strip_prefix('"')
        .or_else(|| s.strip_prefix('\u{201C}'))
        .unwrap_or(s);
    s.strip_suffix('"')
        .or_else(|| s.strip_suffix('\u{201D}'))
        .unwrap_or(s)
}
