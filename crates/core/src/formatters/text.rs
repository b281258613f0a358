use crate::article::ArticleRecord;

/// Configuration for plain text output
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Wrap lines at specified width (0 = no wrapping)
    pub line_width: usize,

    /// Include title and byline header
    pub include_header: bool,
}

/// Plain text formatter for extracted articles
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, record: &ArticleRecord) -> String {
        convert_to_text(record, &self.config)
    }
}

/// Render an extracted article as plain text with the given configuration
pub fn convert_to_text(record: &ArticleRecord, config: &TextConfig) -> String {
    let mut output = String::new();

    if config.include_header {
        output.push_str(&generate_header(record));
        output.push('\n');
    }

    let body = if config.line_width > 0 {
        wrap_text(&record.content, config.line_width)
    } else {
        record.content.clone()
    };
    output.push_str(&body);

    output.trim().to_string()
}

/// Title underline, byline, then the source address
fn generate_header(record: &ArticleRecord) -> String {
    let mut header = String::new();

    if !record.title.is_empty() {
        header.push_str(&record.title);
        header.push('\n');
        header.push_str(&"=".repeat(record.title.chars().count()));
        header.push('\n');
    }

    header.push_str(&record.metadata_line());
    header.push('\n');

    if !record.url.is_empty() {
        header.push_str(&record.url);
        header.push('\n');
    }

    header
}

/// Wrap text to specified line width, keeping blank-line paragraph breaks
fn wrap_text(text: &str, width: usize) -> String {
    text.split("\n\n")
        .map(|paragraph| {
            let words: Vec<&str> = paragraph.split_whitespace().collect();
            wrap_words(&words, width)
        })
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn wrap_words(words: &[&str], width: usize) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in words {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
