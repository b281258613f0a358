//! The extracted article record.
//!
//! This module defines [`ArticleRecord`], the single value produced by an
//! extraction call. It is immutable once built and owned by the caller, which
//! hands its content to the summarizer.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::Result;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[\w'-]+\b").expect("word pattern is valid"));

/// Best-guess article data for a page.
///
/// `author` and `publish_date` are empty when no lookup matched; the date is
/// kept exactly as the page wrote it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Page title.
    pub title: String,
    /// Address the page was loaded from (or its canonical URL).
    pub url: String,
    /// Author name, possibly empty.
    pub author: String,
    /// Raw publish date, possibly empty.
    pub publish_date: String,
    /// Main body text, possibly empty.
    pub content: String,
}

impl ArticleRecord {
    /// Whether extraction produced any body text.
    ///
    /// Empty content is a valid extraction result, but there is nothing to
    /// summarize in it.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Word count of the content.
    pub fn word_count(&self) -> usize {
        count_words(&self.content)
    }

    /// Byline for display: `By {author} • {date}`, either part optional.
    ///
    /// # Example
    ///
    /// ```rust
    /// use article_share_core::ArticleRecord;
    ///
    /// let record = ArticleRecord {
    ///     author: "Jane Smith".to_string(),
    ///     publish_date: "2024-01-15T10:30:00Z".to_string(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(record.metadata_line(), "By Jane Smith • January 15, 2024");
    /// ```
    pub fn metadata_line(&self) -> String {
        let mut parts = Vec::new();
        if !self.author.is_empty() {
            parts.push(format!("By {}", self.author));
        }
        if !self.publish_date.is_empty() {
            parts.push(format_publish_date(&self.publish_date));
        }

        if parts.is_empty() { "No additional metadata available".to_string() } else { parts.join(" • ") }
    }

    /// Gets the record as structured JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Render a raw publish date as `Month D, YYYY`.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates; anything else
/// is returned unchanged.
pub fn format_publish_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = OffsetDateTime::parse(raw, &Rfc3339)
        .map(|dt| dt.date())
        .or_else(|_| Date::parse(raw, format_description!("[year]-[month]-[day]")));

    match date {
        Ok(date) => date
            .format(format_description!("[month repr:long] [day padding:none], [year]"))
            .unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

/// Count words in text using a simple regex pattern
fn count_words(text: &str) -> usize {
    WORD.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ArticleRecord {
        ArticleRecord {
            title: "Test Article".to_string(),
            url: "https://example.com/post".to_string(),
            author: "Test Author".to_string(),
            publish_date: "2024-01-15".to_string(),
            content: "This is a test article with some content.".to_string(),
        }
    }

    #[test]
    fn test_has_content() {
        assert!(record().has_content());
        let empty = ArticleRecord { content: "  \n ".to_string(), ..record() };
        assert!(!empty.has_content());
    }

    #[test]
    fn test_word_count() {
        assert_eq!(record().word_count(), 8);
        assert_eq!(ArticleRecord::default().word_count(), 0);
    }

    #[test]
    fn test_metadata_line_full() {
        assert_eq!(record().metadata_line(), "By Test Author • January 15, 2024");
    }

    #[test]
    fn test_metadata_line_author_only() {
        let only_author = ArticleRecord { publish_date: String::new(), ..record() };
        assert_eq!(only_author.metadata_line(), "By Test Author");
    }

    #[test]
    fn test_metadata_line_empty() {
        assert_eq!(ArticleRecord::default().metadata_line(), "No additional metadata available");
    }

    #[test]
    fn test_format_publish_date() {
        assert_eq!(format_publish_date("2024-03-05T08:00:00+02:00"), "March 5, 2024");
        assert_eq!(format_publish_date("2024-12-31"), "December 31, 2024");
        assert_eq!(format_publish_date("last Tuesday"), "last Tuesday");
    }

    #[test]
    fn test_record_serialization() {
        let json = serde_json::to_string(&record()).unwrap();
        assert!(json.contains(r#""title":"Test Article""#));
        assert!(json.contains(r#""publish_date":"2024-01-15""#));

        let back: ArticleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record());
    }

    #[test]
    fn test_to_json() {
        let json = record().to_json().unwrap();
        assert!(json.is_object());
        assert_eq!(json.get("author").and_then(|v| v.as_str()), Some("Test Author"));
    }
}
