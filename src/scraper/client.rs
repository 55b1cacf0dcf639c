//! Blocking HTTP client with configurable politeness (delay between requests) and a
//! single attempt per URL.

use crate::scraper::error::ScraperError;
use crate::scraper::Fetch;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::{Duration, Instant};

const DEFAULT_USER_AGENT: &str = "QuotesScraper/1.0";
const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub(crate) const DEFAULT_DELAY_SECS: u64 = 0;
const MAX_REDIRECTS: usize = 10;

/// Blocking HTTP client that enforces a delay between requests.
///
/// One inner client is reused for every fetch so connections are pooled.
#[derive(Debug)]
pub struct PoliteClient {
    inner: reqwest::blocking::Client,
    delay: Duration,
    last_request: Option<Instant>,
}

impl PoliteClient {
    /// Build a polite client with default User-Agent, timeout, and delay.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::builder().build()
    }

    pub fn builder() -> PoliteClientBuilder {
        PoliteClientBuilder::default()
    }

    /// Perform a GET request. Sleeps until the configured delay has passed since the last request.
    pub fn get(&mut self, url: &str) -> Result<reqwest::blocking::Response, reqwest::Error> {
        self.wait_delay();
        let result = self.inner.get(url).send();
        self.last_request = Some(Instant::now());
        result
    }

    fn wait_delay(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                std::thread::sleep(self.delay - elapsed);
            }
        }
    }
}

impl Fetch for PoliteClient {
    /// Single GET; any non-2xx status is returned as [ScraperError::HttpStatus].
    fn fetch(&mut self, url: &str) -> Result<String, ScraperError> {
        tracing::trace!(url, "GET");
        let response = self.get(url).map_err(|e| ScraperError::Network {
            url: url.to_string(),
            source: e,
        })?;
        check_response(response, url)
    }
}

/// Check response status and read body as text.
fn check_response(
    response: reqwest::blocking::Response,
    url: &str,
) -> Result<String, ScraperError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    response.text().map_err(|e| ScraperError::BodyRead {
        url: url.to_string(),
        source: e,
    })
}

/// Builder for PoliteClient with optional User-Agent, delay, and timeout.
#[derive(Debug)]
pub struct PoliteClientBuilder {
    user_agent: Option<String>,
    delay_secs: u64,
    timeout_secs: u64,
}

impl Default for PoliteClientBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            delay_secs: DEFAULT_DELAY_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl PoliteClientBuilder {
    /// Set a custom User-Agent. If not set, `QuotesScraper/1.0` is used.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set delay between requests in seconds. Default 0.
    pub fn delay_secs(mut self, secs: u64) -> Self {
        self.delay_secs = secs;
        self
    }

    /// Set request timeout in seconds. Default 15. Applies to listing and detail fetches alike.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build the blocking client and polite wrapper.
    pub fn build(self) -> Result<PoliteClient, reqwest::Error> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );
        let inner = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(self.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(PoliteClient {
            inner,
            delay: Duration::from_secs(self.delay_secs),
            last_request: None,
        })
    }
}
