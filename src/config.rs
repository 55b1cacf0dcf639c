//! Optional config file loading. Search order: ./quotescrape.toml, then
//! $XDG_CONFIG_HOME/quotescrape/config.toml (or ~/.config/quotescrape/config.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default, deny_unknown_fields)]
pub struct Config {
    /// Root listing page; relative links resolve against it.
    pub base_url: Option<String>,
    /// CSV output path. Relative to CWD.
    pub output: Option<PathBuf>,
    /// HTTP User-Agent header.
    pub user_agent: Option<String>,
    /// Request timeout in seconds, for listing and author pages alike.
    pub timeout_secs: Option<u64>,
    /// Delay in seconds between requests.
    pub request_delay_secs: Option<u64>,
    /// Stop after this many listing pages.
    pub max_pages: Option<u32>,
}

/// Search order: (1) ./quotescrape.toml, (2) $XDG_CONFIG_HOME/quotescrape/config.toml.
/// Missing file returns Ok(None). Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config() -> Result<Option<Config>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("quotescrape.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("quotescrape").join("config.toml"));
    }
    for path in &paths {
        if path.exists() {
            return load_config_from(path).map(Some);
        }
    }
    Ok(None)
}

/// Read and parse one config file.
pub fn load_config_from(path: &Path) -> Result<Config, String> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
    let config: Config =
        toml::from_str(&s).map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let c: Config = toml::from_str("").unwrap();
        assert!(c.base_url.is_none());
        assert!(c.output.is_none());
        assert!(c.user_agent.is_none());
        assert!(c.timeout_secs.is_none());
        assert!(c.request_delay_secs.is_none());
        assert!(c.max_pages.is_none());
    }

    #[test]
    fn parse_full_config() {
        let s = r#"
            base_url = "http://localhost:8000"
            output = "data/quotes.csv"
            user_agent = "Custom/1.0"
            timeout_secs = 30
            request_delay_secs = 1
            max_pages = 3
        "#;
        let c: Config = toml::from_str(s).unwrap();
        assert_eq!(c.base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(c.output.as_deref(), Some(Path::new("data/quotes.csv")));
        assert_eq!(c.user_agent.as_deref(), Some("Custom/1.0"));
        assert_eq!(c.timeout_secs, Some(30));
        assert_eq!(c.request_delay_secs, Some(1));
        assert_eq!(c.max_pages, Some(3));
    }

    #[test]
    fn parse_partial_config() {
        let c: Config = toml::from_str("timeout_secs = 5").unwrap();
        assert_eq!(c.timeout_secs, Some(5));
        assert!(c.base_url.is_none());
        assert!(c.output.is_none());
    }

    #[test]
    fn unknown_key_errors() {
        assert!(toml::from_str::<Config>("retry_count = 3").is_err());
    }

    #[test]
    fn invalid_toml_errors() {
        assert!(toml::from_str::<Config>("output = [").is_err());
    }

    #[test]
    fn load_config_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("quotescrape.toml");
        std::fs::write(&path, "max_pages = 2\n")?;
        let c = load_config_from(&path)?;
        assert_eq!(c.max_pages, Some(2));
        Ok(())
    }

    #[test]
    fn load_config_from_bad_file_names_path() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"\n")?;
        let err = load_config_from(&path).err().ok_or("expected error")?;
        assert!(err.starts_with("Invalid config"));
        assert!(err.contains("bad.toml"));
        Ok(())
    }
}
