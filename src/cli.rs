//! CLI parsing and orchestration. Parses args, merges config, runs the crawl, writes CSV.
//! Maps errors to exit codes.

use crate::config;
use crate::scraper::{
    crawl, validate_base_url, CrawlOptions, PoliteClient, ScraperError, DEFAULT_BASE_URL,
    DEFAULT_DELAY_SECS, DEFAULT_TIMEOUT_SECS,
};
use crate::table::{write_csv, TableError};
use clap::Parser;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT: &str = "output.csv";

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Scraping failed: {0}")]
    Scraper(#[from] ScraperError),

    #[error("{0}")]
    Table(#[from] TableError),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Scraper(_) => 2,
            CliRunError::Table(_) => 3,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "quotescrape")]
#[command(about = "Scrape paginated quote listings, enrich with author profiles, and write CSV")]
#[command(
    after_help = "Config file keys (base_url, output, user_agent, timeout_secs, request_delay_secs, max_pages) are read from ./quotescrape.toml or the user config dir. CLI flags override config."
)]
pub struct Args {
    /// Root listing page to start from (default https://quotes.toscrape.com).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output CSV path (default output.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds (overrides config; default 15).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Delay between requests in seconds (overrides config; default 0).
    #[arg(long)]
    pub delay: Option<u64>,

    /// HTTP User-Agent (overrides config).
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Stop after this many listing pages.
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Suppress progress output (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// More log output (-v, -vv). Also prints the error cause chain on failure.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log filter for the given verbosity. `RUST_LOG` is not consulted.
fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "quotescrape=info,warn",
        1 => "quotescrape=debug,info",
        _ => "trace",
    }
}

/// Install the global tracing subscriber. Logs go to stderr.
pub fn init_logging(verbose: u8, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(verbose, quiet)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Ensure output path parent exists.
fn validate_output_path(path: &Path) -> Result<(), CliRunError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(CliRunError::InvalidInput(format!(
                "Cannot write output: {}: parent directory does not exist.",
                path.display()
            )));
        }
    }
    Ok(())
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let config = config::load_config()
        .map_err(CliRunError::InvalidInput)?
        .unwrap_or_default();

    let base_url = args
        .base_url
        .clone()
        .or(config.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    validate_base_url(&base_url).map_err(|e| {
        CliRunError::InvalidInput(format!(
            "Expected an absolute http(s) base URL, e.g. {}. {}",
            DEFAULT_BASE_URL, e
        ))
    })?;

    let output_path = args
        .output
        .clone()
        .or(config.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    validate_output_path(&output_path)?;

    let timeout_secs = args
        .timeout
        .or(config.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let delay_secs = args
        .delay
        .or(config.request_delay_secs)
        .unwrap_or(DEFAULT_DELAY_SECS);
    let user_agent = args.user_agent.clone().or(config.user_agent);
    let options = CrawlOptions {
        max_pages: args.max_pages.or(config.max_pages),
    };

    let mut builder = PoliteClient::builder()
        .timeout_secs(timeout_secs)
        .delay_secs(delay_secs);
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    let mut client = builder
        .build()
        .map_err(|e| CliRunError::InvalidInput(format!("Failed to create HTTP client: {}", e)))?;

    tracing::info!(base_url = %base_url, timeout_secs, "starting crawl");
    let output = crawl(&mut client, &base_url, &options)?;

    let written = write_csv(&output.rows, &output_path)?;
    if written == 0 {
        tracing::warn!(path = %output_path.display(), "no quotes found; output not written");
    }
    if !args.quiet {
        println!(
            "Done. Scraped {} quotes to {}",
            written,
            output_path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_defaults_are_unset() {
        let args = Args::parse_from(["quotescrape"]);
        assert!(args.base_url.is_none());
        assert!(args.output.is_none());
        assert!(args.timeout.is_none());
        assert!(args.max_pages.is_none());
        assert!(!args.quiet);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn args_parse_all_flags() {
        let args = Args::parse_from([
            "quotescrape",
            "--base-url",
            "http://localhost:8000",
            "-o",
            "quotes.csv",
            "--timeout",
            "5",
            "--delay",
            "1",
            "--user-agent",
            "Test/1.0",
            "--max-pages",
            "2",
            "-vv",
        ]);
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(args.output, Some(PathBuf::from("quotes.csv")));
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.delay, Some(1));
        assert_eq!(args.user_agent.as_deref(), Some("Test/1.0"));
        assert_eq!(args.max_pages, Some(2));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["quotescrape", "-q", "-v"]).is_err());
    }

    #[test]
    fn log_filter_levels() {
        assert_eq!(log_filter(0, true), "error");
        assert_eq!(log_filter(0, false), "quotescrape=info,warn");
        assert_eq!(log_filter(1, false), "quotescrape=debug,info");
        assert_eq!(log_filter(3, false), "trace");
    }

    #[test]
    fn validate_output_path_parent_exists() {
        let path = std::env::temp_dir().join("quotescrape_cli_test_output.csv");
        assert!(validate_output_path(&path).is_ok());
        assert!(validate_output_path(Path::new("output.csv")).is_ok());
    }

    #[test]
    fn validate_output_path_parent_missing() {
        let path = PathBuf::from("/nonexistent_dir_quotescrape_xyz/output.csv");
        let result = validate_output_path(&path);
        assert!(result.is_err());
        if let Err(CliRunError::InvalidInput(msg)) = result {
            assert!(msg.contains("parent directory does not exist"));
        }
    }

    #[test]
    fn cli_run_error_exit_codes() {
        assert_eq!(CliRunError::InvalidInput("x".into()).exit_code(), 1);
        assert_eq!(
            CliRunError::Scraper(ScraperError::HttpStatus {
                status: 500,
                url: "https://quotes.toscrape.com".into()
            })
            .exit_code(),
            2
        );
        assert_eq!(
            CliRunError::Table(TableError::Io {
                path: PathBuf::from("out.csv"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
            .exit_code(),
            3
        );
    }

    #[test]
    fn scraper_error_message_names_cause() {
        let e = CliRunError::from(ScraperError::HttpStatus {
            status: 503,
            url: "https://quotes.toscrape.com/page/2".into(),
        });
        assert_eq!(
            e.to_string(),
            "Scraping failed: HTTP 503 when fetching: https://quotes.toscrape.com/page/2"
        );
    }
}
