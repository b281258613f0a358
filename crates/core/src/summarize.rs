//! Extractive share summaries.
//!
//! Sentences are scored on position and length, the best few become bullet
//! points, and an intro line adapted to the audience is placed on top. The
//! heuristic is deterministic; the [`Summarizer`] trait is async so a
//! network-backed model can replace it without touching callers.
//!
//! # Example
//!
//! ```rust
//! use article_share_core::{SummaryRequest, summarize};
//!
//! let content = "The first sentence is long enough to count. A second sentence follows it closely. \
//!                And a third sentence closes out the short article.";
//! let request = SummaryRequest::new(content, "Title", "Worth a look", "general-audience");
//! let summary = summarize(&request).unwrap();
//! assert!(summary.starts_with("Title\n\nI thought this was worth sharing: Worth a look\n\nKey points:\n"));
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use crate::article::ArticleRecord;
use crate::{Result, ShareError};

static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence boundary pattern is valid"));

const MIN_SENTENCE_CHARS: usize = 20;
const MIN_POINTS: usize = 3;
const MAX_POINTS: usize = 5;
const POSITION_WEIGHT: f64 = 0.6;
const LENGTH_WEIGHT: f64 = 0.4;
const TARGET_WORDS: f64 = 20.0;

/// Who the summary is written for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
    /// `technical-team`
    TechnicalTeam,
    /// `business-stakeholders`
    BusinessStakeholders,
    /// `general-audience`
    GeneralAudience,
    /// Any other label, kept verbatim.
    Custom(String),
}

/// Known audience labels and their intro lead-ins.
const AUDIENCE_INTROS: &[(&str, &str)] = &[
    ("technical-team", "I wanted to share this technical article that could be valuable for our work. "),
    ("business-stakeholders", "I found this article with important business implications. "),
    ("general-audience", "I thought this was worth sharing: "),
];

const FALLBACK_INTRO: &str = "I'm sharing this because: ";

impl Audience {
    /// Resolve a label by exact match. Unknown labels become [`Audience::Custom`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "technical-team" => Self::TechnicalTeam,
            "business-stakeholders" => Self::BusinessStakeholders,
            "general-audience" => Self::GeneralAudience,
            other => Self::Custom(other.to_string()),
        }
    }

    /// The label this audience was parsed from.
    pub fn label(&self) -> &str {
        match self {
            Self::TechnicalTeam => "technical-team",
            Self::BusinessStakeholders => "business-stakeholders",
            Self::GeneralAudience => "general-audience",
            Self::Custom(label) => label,
        }
    }

    /// Intro line for this audience with the sharing context appended.
    pub fn intro(&self, context: &str) -> String {
        let lead = AUDIENCE_INTROS
            .iter()
            .find(|(label, _)| *label == self.label())
            .map(|(_, lead)| *lead)
            .unwrap_or(FALLBACK_INTRO);
        format!("{lead}{context}")
    }
}

/// Input to a summarizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Article body text.
    pub content: String,
    /// Article title, used as the first line.
    pub title: String,
    /// Why the user is sharing the article.
    pub context: String,
    /// Audience label, known or free text.
    pub audience: String,
}

impl SummaryRequest {
    /// Creates a request from its parts.
    pub fn new(content: &str, title: &str, context: &str, audience: &str) -> Self {
        Self {
            content: content.to_string(),
            title: title.to_string(),
            context: context.to_string(),
            audience: audience.to_string(),
        }
    }

    /// Creates a request for an extracted article.
    pub fn for_article(article: ArticleRecord, context: &str, audience: &str) -> Self {
        Self {
            content: article.content,
            title: article.title,
            context: context.to_string(),
            audience: audience.to_string(),
        }
    }
}

/// Order of the bullet points in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOrder {
    /// Highest score first.
    #[default]
    Score,
    /// Selected sentences in the order they appear in the article.
    Document,
}

impl FromStr for BulletOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "score" => Ok(Self::Score),
            "document" | "doc" => Ok(Self::Document),
            _ => Err(format!("Invalid bullet order: {s}. Valid options: score, document")),
        }
    }
}

/// Configuration for summarization
#[derive(Debug, Clone, Default)]
pub struct SummarizerConfig {
    /// Bullet ordering
    pub bullet_order: BulletOrder,
    /// Simulated latency applied by [`HeuristicSummarizer`] before it answers
    pub latency: Duration,
}

impl SummarizerConfig {
    /// Creates a new builder for SummarizerConfig.
    pub fn builder() -> SummarizerConfigBuilder {
        SummarizerConfigBuilder::new()
    }
}

/// Builder for SummarizerConfig.
pub struct SummarizerConfigBuilder {
    config: SummarizerConfig,
}

impl SummarizerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: SummarizerConfig::default() }
    }

    /// Sets the bullet ordering.
    pub fn bullet_order(mut self, value: BulletOrder) -> Self {
        self.config.bullet_order = value;
        self
    }

    /// Sets the simulated latency.
    pub fn latency(mut self, value: Duration) -> Self {
        self.config.latency = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> SummarizerConfig {
        self.config
    }
}

impl Default for SummarizerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A candidate sentence with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
    /// The sentence as split from the content, untrimmed
    pub text: String,
    /// Position in the filtered sentence list
    pub index: usize,
    /// Combined position and length score
    pub score: f64,
}

/// Split content into sentences, dropping fragments of 20 characters or fewer.
pub fn split_sentences(content: &str) -> Vec<&str> {
    SENTENCE_BOUNDARY
        .split(content)
        .filter(|s| s.trim().chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

/// Number of bullet points for `sentence_count` sentences.
///
/// `floor(n / 10)` clamped to `3..=5`, never more than `n`.
pub fn target_count(sentence_count: usize) -> usize {
    (sentence_count / 10).clamp(MIN_POINTS, MAX_POINTS).min(sentence_count)
}

/// Score every sentence.
///
/// `0.6 * (1 - index / n) + 0.4 * min(1, words / 20)`
///
/// Words are the pieces between single spaces, so the leading space left on
/// every sentence after the first counts as one extra word.
pub fn score_sentences(sentences: &[&str]) -> Vec<ScoredSentence> {
    let count = sentences.len() as f64;
    sentences
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let position_score = 1.0 - index as f64 / count;
            let words = text.split(' ').count() as f64;
            let length_score = (words / TARGET_WORDS).min(1.0);
            let score = POSITION_WEIGHT * position_score + LENGTH_WEIGHT * length_score;
            tracing::trace!(index, score, "scored sentence");
            ScoredSentence { text: text.to_string(), index, score }
        })
        .collect()
}

/// The best `count` sentences, highest score first. Ties keep article order.
pub fn select_sentences(mut scored: Vec<ScoredSentence>, count: usize) -> Vec<ScoredSentence> {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(count);
    scored
}

/// Summarize with the default configuration.
///
/// # Errors
///
/// Returns [`ShareError::EmptyContent`] when no sentence is longer than 20
/// characters.
pub fn summarize(request: &SummaryRequest) -> Result<String> {
    summarize_with_config(request, &SummarizerConfig::default())
}

/// Summarize with a custom configuration.
pub fn summarize_with_config(request: &SummaryRequest, config: &SummarizerConfig) -> Result<String> {
    let sentences = split_sentences(&request.content);
    if sentences.is_empty() {
        return Err(ShareError::EmptyContent);
    }

    let count = target_count(sentences.len());
    let mut selected = select_sentences(score_sentences(&sentences), count);
    if config.bullet_order == BulletOrder::Document {
        selected.sort_by_key(|s| s.index);
    }

    tracing::debug!(sentences = sentences.len(), selected = selected.len(), audience = %request.audience, "summarized");

    let audience = Audience::from_label(&request.audience);
    let mut summary = format!("{}\n\n{}\n\nKey points:\n", request.title, audience.intro(&request.context));
    for sentence in &selected {
        summary.push_str(&format!("• {}.\n", sentence.text.trim()));
    }

    Ok(summary)
}

/// A source of share summaries.
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce the formatted summary for a request.
    async fn summarize(&self, request: &SummaryRequest) -> Result<String>;
}

/// The deterministic position-and-length summarizer.
#[derive(Debug, Clone, Default)]
pub struct HeuristicSummarizer {
    config: SummarizerConfig,
}

impl HeuristicSummarizer {
    /// Creates a summarizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a summarizer with a custom configuration.
    pub fn with_config(config: SummarizerConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl Summarizer for HeuristicSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String> {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
        summarize_with_config(request, &self.config)
    }
}
