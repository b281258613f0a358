//! Error types for article extraction and share summaries.
//!
//! This module defines the main error type [`ShareError`] which represents
//! all failures that can surface from extraction, summarization, fetching,
//! and input validation.
//!
//! # Example
//!
//! ```rust
//! use article_share_core::{ShareError, SummaryRequest, summarize};
//!
//! let request = SummaryRequest::new("Too short.", "Title", "For the team", "technical-team");
//! assert!(matches!(summarize(&request), Err(ShareError::EmptyContent)));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extraction and summarization operations.
///
/// Weak-signal outcomes (an empty author, an unparsed date, thin content)
/// are not errors. Only traversal failures, unsummarizable input, and I/O
/// problems are represented here.
#[derive(Error, Debug)]
pub enum ShareError {
    /// The document traversal could not run at all.
    ///
    /// Returned by the extractor when the document backend rejects a lookup,
    /// for example an unusable selector in a custom configuration.
    #[error("Failed to extract article content: {0}")]
    ExtractionFailed(String),

    /// The content yielded no sentence long enough to summarize.
    #[error("Content has no sentences long enough to summarize")]
    EmptyContent,

    /// Extraction succeeded but produced no body text.
    ///
    /// Raised by the share pipeline, which rejects empty extractions before
    /// asking for a summary.
    #[error("No readable content was found on the page")]
    NoReadableContent,

    /// The sharing context is missing or too short.
    #[error("Invalid sharing context: {0}")]
    InvalidContext(String),

    /// The audience label is blank or too short.
    #[error("Invalid audience: {0}")]
    InvalidAudience(String),

    /// A CSS selector could not be parsed by the document backend.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// HTTP request errors from reqwest.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Standard I/O errors while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors.
    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for ShareError.
pub type Result<T> = std::result::Result<T, ShareError>;
