use crate::Result;
use crate::article::ArticleRecord;
use serde::Serialize;

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Extracted article
    pub article: &'a ArticleRecord,
    /// Word count of the article content
    pub word_count: usize,
    /// Formatted summary, when one was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a str>,
    /// Clipboard-ready share text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_text: Option<&'a str>,
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

fn to_string<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty { Ok(serde_json::to_string_pretty(value)?) } else { Ok(serde_json::to_string(value)?) }
}

/// Convert an article and its optional summary to JSON
pub fn convert_to_json(
    record: &ArticleRecord, summary: Option<&str>, share_text: Option<&str>, config: &JsonConfig,
) -> Result<String> {
    let output = JsonOutput { article: record, word_count: record.word_count(), summary, share_text };
    to_string(&output, config.pretty)
}

/// Convert just the record to JSON (for --extract-only)
pub fn record_to_json(record: &ArticleRecord, pretty: bool) -> Result<String> {
    to_string(record, pretty)
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, record: &ArticleRecord, summary: Option<&str>, share_text: Option<&str>) -> Result<String> {
        convert_to_json(record, summary, share_text, &self.config)
    }

    pub fn record_only(&self, record: &ArticleRecord) -> Result<String> {
        record_to_json(record, self.config.pretty)
    }
}
