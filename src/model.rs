//! Data model for scraped quotes.
//!
//! Listing pages produce [QuoteFragment]s, author pages produce [AuthorInfo], and the crawl
//! joins the two into [OutputRow]s, which the CSV writer consumes.

use serde::Serialize;

/// One quote record as extracted from a listing page, before author enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteFragment {
    pub text: String,
    pub author_display_name: String,
    pub tags: Vec<String>,
    /// Absolute author profile URL, or empty when the record has no author link.
    pub author_detail_url: String,
}

/// Fields scraped from an author profile page. All empty is the placeholder used when the
/// profile is unknown or could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorInfo {
    pub full_name: String,
    pub birth_date: String,
    pub birth_place: String,
}

/// One CSV row: a quote joined with its author's profile.
///
/// Field order here is the column order of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub quote_text: String,
    pub author_name: String,
    /// Tags joined with `,` into a single column.
    pub tags: String,
    pub author_full_name: String,
    pub author_birth_date: String,
    pub author_birth_place: String,
}

impl OutputRow {
    pub fn join(fragment: QuoteFragment, author: AuthorInfo) -> Self {
        Self {
            quote_text: fragment.text,
            author_name: fragment.author_display_name,
            tags: fragment.tags.join(","),
            author_full_name: author.full_name,
            author_birth_date: author.birth_date,
            author_birth_place: author.birth_place,
        }
    }
}
