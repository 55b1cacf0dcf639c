//! Memoized author profile lookup, keyed by profile URL.

use crate::model::AuthorInfo;
use crate::scraper::detail::DetailExtractor;
use crate::scraper::error::ScraperError;
use crate::scraper::Fetch;
use std::collections::HashMap;

/// Author profiles fetched so far in this run.
///
/// Each distinct URL is fetched at most once; successful results are kept for the whole run.
/// Failures are not cached, so a later record by the same author retries the fetch.
#[derive(Debug)]
pub struct AuthorCache {
    extractor: DetailExtractor,
    entries: HashMap<String, AuthorInfo>,
    hits: u32,
}

impl AuthorCache {
    pub fn new(extractor: DetailExtractor) -> Self {
        Self {
            extractor,
            entries: HashMap::new(),
            hits: 0,
        }
    }

    /// Return the profile for `url`, fetching and extracting it on first use.
    pub fn resolve<F: Fetch + ?Sized>(
        &mut self,
        fetcher: &mut F,
        url: &str,
    ) -> Result<AuthorInfo, ScraperError> {
        if let Some(info) = self.entries.get(url) {
            self.hits += 1;
            tracing::debug!(url, "author cache hit");
            return Ok(info.clone());
        }
        tracing::debug!(url, "fetching author page");
        let html = fetcher.fetch(url)?;
        let info = self.extractor.extract_html(&html);
        self.entries.insert(url.to_string(), info.clone());
        Ok(info)
    }

    /// Number of distinct profiles fetched successfully.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered without a fetch.
    pub fn hits(&self) -> u32 {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serves one canned author page, or a 503 for every URL when `fail` is set.
    struct CountingFetcher {
        calls: Vec<String>,
        fail: bool,
    }

    impl Fetch for CountingFetcher {
        fn fetch(&mut self, url: &str) -> Result<String, ScraperError> {
            self.calls.push(url.to_string());
            if self.fail {
                return Err(ScraperError::HttpStatus {
                    status: 503,
                    url: url.to_string(),
                });
            }
            Ok(r#"<h3 class="author-title">Jane Doe</h3>
<span class="author-born-date">June 1, 1900</span>
<span class="author-born-location">in Springfield</span>"#
                .to_string())
        }
    }

    fn cache() -> Result<AuthorCache, ScraperError> {
        Ok(AuthorCache::new(DetailExtractor::new()?))
    }

    #[test]
    fn second_resolve_uses_cache() -> Result<(), ScraperError> {
        let mut fetcher = CountingFetcher {
            calls: Vec::new(),
            fail: false,
        };
        let mut cache = cache()?;
        let url = "https://quotes.toscrape.com/author/jane-doe";
        let first = cache.resolve(&mut fetcher, url)?;
        let second = cache.resolve(&mut fetcher, url)?;
        assert_eq!(fetcher.calls.len(), 1);
        assert_eq!(first, second);
        assert_eq!(first.birth_place, "Springfield");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.resolve(&mut fetcher, url)?, first);
        assert_eq!(fetcher.calls.len(), 1);
        assert_eq!(cache.hits(), 2);
        Ok(())
    }

    #[test]
    fn distinct_urls_are_fetched_separately() -> Result<(), ScraperError> {
        let mut fetcher = CountingFetcher {
            calls: Vec::new(),
            fail: false,
        };
        let mut cache = cache()?;
        cache.resolve(&mut fetcher, "https://quotes.toscrape.com/author/a")?;
        cache.resolve(&mut fetcher, "https://quotes.toscrape.com/author/b")?;
        cache.resolve(&mut fetcher, "https://quotes.toscrape.com/author/a")?;
        assert_eq!(
            fetcher.calls,
            vec![
                "https://quotes.toscrape.com/author/a".to_string(),
                "https://quotes.toscrape.com/author/b".to_string(),
            ]
        );
        assert_eq!(cache.len(), 2);
        Ok(())
    }

    #[test]
    fn failure_is_not_cached() -> Result<(), ScraperError> {
        let mut fetcher = CountingFetcher {
            calls: Vec::new(),
            fail: true,
        };
        let mut cache = cache()?;
        let url = "https://quotes.toscrape.com/author/gone";
        assert!(matches!(
            cache.resolve(&mut fetcher, url),
            Err(ScraperError::HttpStatus { status: 503, .. })
        ));
        assert!(cache.is_empty());
        assert!(cache.resolve(&mut fetcher, url).is_err());
        assert_eq!(fetcher.calls.len(), 2);
        Ok(())
    }
}
