//! Author profile extraction.

use crate::model::AuthorInfo;
use crate::scraper::error::ScraperError;
use crate::scraper::{parse_selector, select_text};
use scraper::{Html, Selector};

/// Extracts [AuthorInfo] from an author profile page. Missing fields are empty strings.
#[derive(Debug)]
pub struct DetailExtractor {
    title: Selector,
    born_date: Selector,
    born_location: Selector,
}

impl DetailExtractor {
    pub fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            title: parse_selector("h3.author-title")?,
            born_date: parse_selector("span.author-born-date")?,
            born_location: parse_selector("span.author-born-location")?,
        })
    }

    pub fn extract(&self, doc: &Html) -> AuthorInfo {
        let root = doc.root_element();
        AuthorInfo {
            full_name: select_text(root, &self.title).unwrap_or_default(),
            birth_date: select_text(root, &self.born_date).unwrap_or_default(),
            birth_place: select_text(root, &self.born_location)
                .map(|raw| strip_in_prefix(&raw).to_string())
                .unwrap_or_default(),
        }
    }

    pub fn extract_html(&self, html: &str) -> AuthorInfo {
        self.extract(&Html::parse_document(html))
    }
}

/// Drop a leading "in" (any case) followed by whitespace: "in Ulm, Germany" -> "Ulm, Germany".
fn strip_in_prefix(raw: &str) -> &str {
    let s = raw.trim();
    let mut chars = s.char_indices();
    let is_in = matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some((_, i)), Some((_, n)), Some((_, ws)))
            if i.eq_ignore_ascii_case(&'i') && n.eq_ignore_ascii_case(&'n') && ws.is_whitespace()
    );
    if is_in {
        s[2..].trim()
    } else {
        s
    }
}
