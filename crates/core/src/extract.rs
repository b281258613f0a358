use crate::article::ArticleRecord;
use crate::metadata::{
    Lookup, default_author_chain, default_date_chain, default_title_chain, default_url_chain, resolve_chain,
    resolve_title, resolve_url,
};
use crate::page::{PageDocument, PageNode, normalize_whitespace};
use crate::{Result, ShareError};

/// Container selectors tried by the selector scan, strongest first.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".article",
    ".post-content",
    ".article-content",
    ".entry-content",
    "main",
    "#content",
    ".content",
];

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Container selectors for the selector scan
    pub content_selectors: Vec<String>,
    /// Selector for paragraph-level blocks
    pub paragraph_selector: String,
    /// A container or densest parent is accepted above this many characters
    pub min_content_chars: usize,
    /// Paragraphs at or below this many characters are dropped by the fallback
    pub min_paragraph_chars: usize,
    /// Author lookup chain
    pub author_lookups: Vec<Lookup>,
    /// Publish date lookup chain
    pub date_lookups: Vec<Lookup>,
    /// Title lookups used when `<title>` is blank
    pub title_lookups: Vec<Lookup>,
    /// URL lookups used when the document location is unknown
    pub url_lookups: Vec<Lookup>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            content_selectors: CONTENT_SELECTORS.iter().map(|s| s.to_string()).collect(),
            paragraph_selector: "p".to_string(),
            min_content_chars: 200,
            min_paragraph_chars: 20,
            author_lookups: default_author_chain(),
            date_lookups: default_date_chain(),
            title_lookups: default_title_chain(),
            url_lookups: default_url_chain(),
        }
    }
}

impl ExtractorConfig {
    /// Creates a new builder for ExtractorConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use article_share_core::ExtractorConfig;
    ///
    /// let config = ExtractorConfig::builder()
    ///     .min_content_chars(500)
    ///     .content_selector(".story-body")
    ///     .build();
    /// assert_eq!(config.content_selectors.last().map(String::as_str), Some(".story-body"));
    /// ```
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }
}

/// Builder for ExtractorConfig.
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractorConfig::default() }
    }

    /// Appends a container selector to the selector scan.
    pub fn content_selector(mut self, selector: &str) -> Self {
        self.config.content_selectors.push(selector.to_string());
        self
    }

    /// Replaces the container selectors.
    pub fn content_selectors(mut self, selectors: Vec<String>) -> Self {
        self.config.content_selectors = selectors;
        self
    }

    /// Sets the acceptance threshold for containers and densest parents.
    pub fn min_content_chars(mut self, value: usize) -> Self {
        self.config.min_content_chars = value;
        self
    }

    /// Sets the minimum paragraph length kept by the fallback.
    pub fn min_paragraph_chars(mut self, value: usize) -> Self {
        self.config.min_paragraph_chars = value;
        self
    }

    /// Replaces the author lookup chain.
    pub fn author_lookups(mut self, lookups: Vec<Lookup>) -> Self {
        self.config.author_lookups = lookups;
        self
    }

    /// Replaces the publish date lookup chain.
    pub fn date_lookups(mut self, lookups: Vec<Lookup>) -> Self {
        self.config.date_lookups = lookups;
        self
    }

    /// Replaces the title lookup chain.
    pub fn title_lookups(mut self, lookups: Vec<Lookup>) -> Self {
        self.config.title_lookups = lookups;
        self
    }

    /// Replaces the canonical URL lookup chain.
    pub fn url_lookups(mut self, lookups: Vec<Lookup>) -> Self {
        self.config.url_lookups = lookups;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}

impl Default for ExtractorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Which fallback tier produced the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTier {
    /// A container selector matched; holds the selector.
    SelectorScan(String),
    /// The parent holding the most paragraph text.
    DensestParent,
    /// All sufficiently long paragraphs joined together.
    ParagraphConcat,
}

/// The result of main content resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    /// The body text
    pub text: String,
    /// The tier that produced it
    pub tier: ContentTier,
}

/// Extracts article records from pages.
///
/// # Example
///
/// ```rust
/// use article_share_core::{ContentExtractor, Document};
///
/// let body = "Readable article text. ".repeat(20);
/// let html = format!("<html><head><title>Post</title></head><body><article>{body}</article></body></html>");
/// let record = ContentExtractor::new().extract(&Document::parse(&html)).unwrap();
/// assert_eq!(record.title, "Post");
/// assert!(record.content.starts_with("Readable article text."));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContentExtractor {
    config: ExtractorConfig,
}

impl ContentExtractor {
    /// Creates an extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with a custom configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Build an [`ArticleRecord`] from a document.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::ExtractionFailed`] if the document could not be
    /// traversed. Missing metadata and empty content are not errors.
    pub fn extract<D: PageDocument>(&self, doc: &D) -> Result<ArticleRecord> {
        self.try_extract(doc).map_err(|e| match e {
            ShareError::ExtractionFailed(_) => e,
            other => ShareError::ExtractionFailed(other.to_string()),
        })
    }

    fn try_extract<D: PageDocument>(&self, doc: &D) -> Result<ArticleRecord> {
        let title = resolve_title(doc, &self.config.title_lookups)?;
        let url = resolve_url(doc, &self.config.url_lookups)?;
        let author = resolve_chain(doc, &self.config.author_lookups)?;
        let publish_date = resolve_chain(doc, &self.config.date_lookups)?;
        let content = extract_main_content(doc, &self.config)?;

        tracing::debug!(
            tier = ?content.tier,
            chars = content.text.chars().count(),
            has_author = !author.is_empty(),
            has_date = !publish_date.is_empty(),
            "extracted article"
        );

        Ok(ArticleRecord { title, url, author, publish_date, content: content.text })
    }
}

/// Extract an [`ArticleRecord`] with the default configuration.
pub fn extract_article<D: PageDocument>(doc: &D) -> Result<ArticleRecord> {
    ContentExtractor::new().extract(doc)
}

/// Resolve the main body text using the three fallback tiers.
///
/// 1. The first element of each container selector, accepted when its
///    normalized text is longer than `min_content_chars`.
/// 2. The parent element holding the most paragraph text, accepted when
///    that total is longer than `min_content_chars`.
/// 3. Every paragraph longer than `min_paragraph_chars`, joined by blank
///    lines. This tier always succeeds, possibly with an empty string.
pub fn extract_main_content<D: PageDocument>(doc: &D, config: &ExtractorConfig) -> Result<ExtractedContent> {
    if let Some(found) = scan_selectors(doc, config)? {
        return Ok(found);
    }

    let paragraphs = doc.select_all(&config.paragraph_selector)?;

    if let Some(found) = densest_parent(&paragraphs, config) {
        return Ok(found);
    }

    let text = concat_paragraphs(&paragraphs, config.min_paragraph_chars);
    tracing::debug!(chars = text.chars().count(), "using paragraph concatenation");
    Ok(ExtractedContent { text, tier: ContentTier::ParagraphConcat })
}

fn scan_selectors<D: PageDocument>(doc: &D, config: &ExtractorConfig) -> Result<Option<ExtractedContent>> {
    for selector in &config.content_selectors {
        let Some(element) = doc.select_first(selector)? else {
            continue;
        };

        let text = normalize_whitespace(&element.text());
        let chars = text.chars().count();
        if chars > config.min_content_chars {
            tracing::debug!(%selector, chars, "selector scan matched");
            return Ok(Some(ExtractedContent { text, tier: ContentTier::SelectorScan(selector.clone()) }));
        }
        tracing::trace!(%selector, chars, "container too short");
    }
    Ok(None)
}

/// Group paragraphs by immediate parent and pick the parent with the most
/// paragraph text. Ties go to the parent that reached the total first.
fn densest_parent<N: PageNode>(paragraphs: &[N], config: &ExtractorConfig) -> Option<ExtractedContent> {
    let mut totals: Vec<(N, usize)> = Vec::new();
    let mut best: Option<(usize, usize)> = None;

    for paragraph in paragraphs {
        let Some(parent) = paragraph.parent() else {
            continue;
        };
        let len = paragraph.text().chars().count();

        let slot = match totals.iter().position(|(p, _)| *p == parent) {
            Some(slot) => slot,
            None => {
                totals.push((parent, 0));
                totals.len() - 1
            }
        };
        totals[slot].1 += len;

        let total = totals[slot].1;
        if best.is_none_or(|(_, best_total)| total > best_total) {
            best = Some((slot, total));
        }
    }

    let (slot, total) = best?;
    if total <= config.min_content_chars {
        tracing::trace!(total, "densest parent too short");
        return None;
    }

    tracing::debug!(total, parents = totals.len(), "densest paragraph parent matched");
    Some(ExtractedContent { text: normalize_whitespace(&totals[slot].0.text()), tier: ContentTier::DensestParent })
}

fn concat_paragraphs<N: PageNode>(paragraphs: &[N], min_chars: usize) -> String {
    paragraphs
        .iter()
        .map(|p| p.text().trim().to_string())
        .filter(|text| text.chars().count() > min_chars)
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}
