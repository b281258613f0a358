//! End-to-end sharing: load a page, extract the article, summarize it and
//! compose the text a user pastes into a message.

use serde::Serialize;

use crate::article::ArticleRecord;
use crate::extract::{ContentExtractor, ExtractorConfig};
use crate::fetch::{FetchConfig, PageSource};
use crate::parse::Document;
use crate::summarize::{Summarizer, SummaryRequest};
use crate::{Result, ShareError};

/// Shortest accepted sharing context, after trimming.
pub const MIN_CONTEXT_CHARS: usize = 3;

/// Shortest accepted audience label, after trimming.
pub const MIN_AUDIENCE_CHARS: usize = 3;

/// Compose the clipboard text: the page address, a blank line, the summary.
///
/// # Example
///
/// ```rust
/// use article_share_core::share_text;
///
/// let text = share_text("https://example.com/post", "Title\n\nBody");
/// assert_eq!(text, "https://example.com/post\n\nTitle\n\nBody");
/// ```
pub fn share_text(url: &str, summary: &str) -> String {
    format!("{url}\n\n{summary}")
}

/// Check the user's reason for sharing and return it trimmed.
///
/// # Errors
///
/// Returns [`ShareError::InvalidContext`] when fewer than
/// [`MIN_CONTEXT_CHARS`] characters remain after trimming.
pub fn validate_context(context: &str) -> Result<&str> {
    let trimmed = context.trim();
    if trimmed.chars().count() < MIN_CONTEXT_CHARS {
        return Err(ShareError::InvalidContext(format!(
            "context must be at least {MIN_CONTEXT_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

/// Check an audience label and return it trimmed.
///
/// # Errors
///
/// Returns [`ShareError::InvalidAudience`] when fewer than
/// [`MIN_AUDIENCE_CHARS`] characters remain after trimming.
pub fn validate_audience(audience: &str) -> Result<&str> {
    let trimmed = audience.trim();
    if trimmed.chars().count() < MIN_AUDIENCE_CHARS {
        return Err(ShareError::InvalidAudience(format!(
            "audience must be at least {MIN_AUDIENCE_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

/// Build a summary request from an extraction result.
///
/// # Errors
///
/// [`ShareError::InvalidContext`] for a too-short context,
/// [`ShareError::InvalidAudience`] for a blank audience and
/// [`ShareError::NoReadableContent`] when the article has no body text.
pub fn prepare_request(record: &ArticleRecord, context: &str, audience: &str) -> Result<SummaryRequest> {
    let context = validate_context(context)?;
    let audience = validate_audience(audience)?;
    if !record.has_content() {
        return Err(ShareError::NoReadableContent);
    }
    Ok(SummaryRequest::new(&record.content, &record.title, context, audience))
}

/// A summarized article ready to share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedArticle {
    pub article: ArticleRecord,
    pub summary: String,
    pub share_text: String,
}

/// Main entry point for sharing pages.
///
/// # Example
///
/// ```rust
/// use article_share_core::ArticleShare;
///
/// let sharer = ArticleShare::new();
/// let body = "Body text for the post. ".repeat(12);
/// let html = format!("<html><head><title>Post</title></head><body><article>{body}</article></body></html>");
/// let record = sharer.extract_html(&html).unwrap();
/// assert_eq!(record.title, "Post");
/// assert!(record.content.starts_with("Body text for the post."));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArticleShare {
    extractor: ContentExtractor,
    fetch: FetchConfig,
}

impl ArticleShare {
    /// Creates an instance with default extraction and fetch settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an instance with a custom extraction configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { extractor: ContentExtractor::with_config(config), fetch: FetchConfig::default() }
    }

    /// Replaces the HTTP settings used for URL sources.
    pub fn fetch_config(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Extracts an article from an HTML string with no known address.
    pub fn extract_html(&self, html: &str) -> Result<ArticleRecord> {
        self.extractor.extract(&Document::parse(html))
    }

    /// Extracts an article from HTML loaded from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::InvalidUrl`] if the URL is invalid.
    pub fn extract_html_with_url(&self, html: &str, url: &str) -> Result<ArticleRecord> {
        self.extractor.extract(&Document::parse_with_url(html, url)?)
    }

    /// Read the raw HTML of a page source with this instance's HTTP settings.
    pub async fn load_html(&self, source: &PageSource) -> Result<String> {
        source.load(&self.fetch).await
    }

    /// Extract an article from HTML read from `source`, using its address
    /// when it has one.
    pub fn extract_source(&self, html: &str, source: &PageSource) -> Result<ArticleRecord> {
        match source.url() {
            Some(url) => self.extract_html_with_url(html, url.as_str()),
            None => self.extract_html(html),
        }
    }

    /// Load a page from any source and extract its article.
    pub async fn load(&self, source: &PageSource) -> Result<ArticleRecord> {
        let html = self.load_html(source).await?;
        self.extract_source(&html, source)
    }

    /// Summarize an extracted article and compose its share text.
    ///
    /// # Errors
    ///
    /// Everything [`prepare_request`] rejects, plus the summarizer's own
    /// failures such as [`ShareError::EmptyContent`].
    pub async fn share<S>(
        &self, record: ArticleRecord, context: &str, audience: &str, summarizer: &S,
    ) -> Result<SharedArticle>
    where
        S: Summarizer + ?Sized,
    {
        let request = prepare_request(&record, context, audience)?;
        let summary = summarizer.summarize(&request).await?;
        let share_text = share_text(&record.url, &summary);
        tracing::debug!(url = %record.url, chars = share_text.len(), "share text composed");
        Ok(SharedArticle { article: record, summary, share_text })
    }
}

/// Convenience function for one-liner extraction with defaults.
pub fn extract_html(html: &str) -> Result<ArticleRecord> {
    ArticleShare::new().extract_html(html)
}

/// Convenience function for one-liner extraction of a page with a known address.
pub fn extract_html_with_url(html: &str, url: &str) -> Result<ArticleRecord> {
    ArticleShare::new().extract_html_with_url(html, url)
}
