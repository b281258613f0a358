//! Page loading from URLs, files, and stdin.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

#[cfg(feature = "fetch")]
use std::time::Duration;

use url::Url;

use crate::{Result, ShareError};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; ArticleShare/0.1)".to_string() }
    }
}

/// Where a page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// An http(s) address.
    Url(Url),
    /// A local HTML file.
    File(PathBuf),
    /// Standard input.
    Stdin,
}

impl PageSource {
    /// Classify a user-supplied input: `-` is stdin, http(s) URLs are
    /// fetched, anything else is a file path.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::InvalidUrl`] for an http(s) input that does not
    /// parse.
    pub fn detect(input: &str) -> Result<Self> {
        if input == "-" {
            Ok(Self::Stdin)
        } else if input.starts_with("http://") || input.starts_with("https://") {
            Url::parse(input)
                .map(Self::Url)
                .map_err(|e| ShareError::InvalidUrl(format!("{input}: {e}")))
        } else {
            Ok(Self::File(PathBuf::from(input)))
        }
    }

    /// The address to report for pages from this source.
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Url(url) => Some(url),
            _ => None,
        }
    }

    /// Read the page HTML.
    pub async fn load(&self, config: &FetchConfig) -> Result<String> {
        match self {
            Self::Url(url) => fetch_url(url.as_str(), config).await,
            Self::File(path) => read_file(path),
            Self::Stdin => read_stdin(),
        }
    }
}

/// Fetches HTML content from a URL.
///
/// Follows redirects and maps client timeouts to [`ShareError::Timeout`].
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| ShareError::InvalidUrl(e.to_string()))?;
    tracing::debug!(url = %parsed_url, timeout = config.timeout, "fetching page");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                ShareError::Timeout { timeout: config.timeout }
            } else {
                ShareError::HttpError(e)
            }
        })?;

    Ok(response.text().await?)
}

/// Without the `fetch` feature only local sources can be read.
#[cfg(not(feature = "fetch"))]
pub async fn fetch_url(url: &str, _config: &FetchConfig) -> Result<String> {
    Err(ShareError::InvalidUrl(format!("{url}: built without the `fetch` feature")))
}

/// Reads HTML content from a local file.
pub fn read_file(path: impl Into<PathBuf>) -> Result<String> {
    let path = path.into();
    if !path.exists() {
        return Err(ShareError::FileNotFound(path));
    }
    Ok(fs::read_to_string(&path)?)
}

/// Reads HTML content from standard input until EOF.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
