//! Article metadata lookups.
//!
//! Author and publish date are resolved through ordered chains of
//! [`Lookup`] strategies. Each strategy is a pure read of the document; the
//! first one producing a non-empty value wins. Earlier entries are the
//! stronger signals (explicit metadata) and later ones the weaker (generic
//! class names).

use serde_json::Value;

use crate::Result;
use crate::page::{PageDocument, PageNode, normalize_whitespace};

/// A single metadata lookup strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Read the first element matching a CSS selector.
    ///
    /// `<meta>` elements yield their `content` attribute, `<time>` elements
    /// their `datetime` attribute (or text when that is empty), anything else
    /// its trimmed text.
    Selector(String),
    /// Read a top-level field of the first parseable JSON-LD block.
    ///
    /// Person objects and arrays resolve to the first `name`.
    JsonLd(String),
}

impl Lookup {
    /// Shorthand for [`Lookup::Selector`].
    pub fn selector(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }

    /// Shorthand for [`Lookup::JsonLd`].
    pub fn json_ld(field: &str) -> Self {
        Self::JsonLd(field.to_string())
    }

    /// Run the strategy against a document.
    ///
    /// Returns `Ok(None)` when nothing matched or the match was empty.
    pub fn resolve<D: PageDocument>(&self, doc: &D) -> Result<Option<String>> {
        let value = match self {
            Self::Selector(selector) => doc.select_first(selector)?.map(|el| element_value(&el)),
            Self::JsonLd(field) => {
                extract_json_ld(doc)?.and_then(|json| json.get(field.as_str()).and_then(json_ld_text))
            }
        };

        Ok(value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
    }
}

fn element_value<N: PageNode>(el: &N) -> String {
    match el.tag_name().as_str() {
        "meta" => el.attr("content").unwrap_or_default(),
        "time" => el
            .attr("datetime")
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| el.text()),
        _ => el.text(),
    }
}

/// Walk a chain and return the first non-empty value, or an empty string.
pub fn resolve_chain<D: PageDocument>(doc: &D, chain: &[Lookup]) -> Result<String> {
    for lookup in chain {
        if let Some(value) = lookup.resolve(doc)? {
            tracing::debug!(?lookup, %value, "metadata lookup matched");
            return Ok(value);
        }
    }
    Ok(String::new())
}

/// Author strategies, strongest first.
pub fn default_author_chain() -> Vec<Lookup> {
    vec![
        Lookup::selector(r#"meta[name="author"]"#),
        Lookup::selector(r#"meta[property="article:author"]"#),
        Lookup::selector(r#"a[rel="author"]"#),
        Lookup::selector(".author"),
        Lookup::selector(".byline"),
        Lookup::json_ld("author"),
    ]
}

/// Publish date strategies, strongest first.
pub fn default_date_chain() -> Vec<Lookup> {
    vec![
        Lookup::selector(r#"meta[name="date"]"#),
        Lookup::selector(r#"meta[property="article:published_time"]"#),
        Lookup::selector("time"),
        Lookup::selector(".date"),
        Lookup::selector(".published"),
        Lookup::json_ld("datePublished"),
    ]
}

/// Title strategies. The document title comes first; the others only apply
/// when it is missing or blank.
pub fn default_title_chain() -> Vec<Lookup> {
    vec![Lookup::selector(r#"meta[property="og:title"]"#), Lookup::selector("h1")]
}

/// Canonical address strategies, used when the document location is unknown.
pub fn default_url_chain() -> Vec<Lookup> {
    vec![
        Lookup::selector(r#"link[rel="canonical"]"#),
        Lookup::selector(r#"meta[property="og:url"]"#),
    ]
}

/// Resolve the article title: `<title>` first, then `chain`.
pub fn resolve_title<D: PageDocument>(doc: &D, chain: &[Lookup]) -> Result<String> {
    if let Some(title) = doc.title().map(|t| normalize_whitespace(&t)).filter(|t| !t.is_empty()) {
        return Ok(title);
    }
    resolve_chain(doc, chain).map(|t| normalize_whitespace(&t))
}

/// Resolve the article URL: the document location first, then `chain`.
///
/// `<link>` elements contribute their `href`.
pub fn resolve_url<D: PageDocument>(doc: &D, chain: &[Lookup]) -> Result<String> {
    if let Some(location) = doc.location().filter(|l| !l.is_empty()) {
        return Ok(location);
    }
    for lookup in chain {
        let value = match lookup {
            Lookup::Selector(selector) => doc
                .select_first(selector)?
                .and_then(|el| if el.tag_name() == "link" { el.attr("href") } else { Some(element_value(&el)) }),
            Lookup::JsonLd(_) => lookup.resolve(doc)?,
        };
        if let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            return Ok(value);
        }
    }
    Ok(String::new())
}

/// Extract and parse JSON-LD from script tags
fn extract_json_ld<D: PageDocument>(doc: &D) -> Result<Option<Value>> {
    for el in doc.select_all(r#"script[type="application/ld+json"]"#)? {
        let text = el.text();
        if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
            let value = match value {
                Value::Array(items) => match items.into_iter().find(Value::is_object) {
                    Some(first) => first,
                    None => continue,
                },
                other => other,
            };
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Text of a JSON-LD value. Handles strings, objects with `name`, and arrays.
fn json_ld_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(str::to_string),
        Value::Array(items) => items.first().and_then(json_ld_text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    const HTML_WITH_META: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <title>Test Page Title</title>
            <meta name="author" content="John Doe">
            <meta property="article:published_time" content="2024-01-15T10:30:00Z">
            <link rel="canonical" href="https://example.com/canonical">
        </head>
        <body>
            <h1>Main Heading</h1>
            <span class="byline">By Someone Else</span>
            <time datetime="2024-02-01">February 1, 2024</time>
        </body>
        </html>
    "#;

    #[test]
    fn test_author_prefers_meta() {
        let doc = Document::parse(HTML_WITH_META);
        assert_eq!(resolve_chain(&doc, &default_author_chain()).unwrap(), "John Doe");
    }

    #[test]
    fn test_author_falls_back_to_byline() {
        let doc = Document::parse(r#"<html><body><div class="byline">  Jane Roe </div></body></html>"#);
        assert_eq!(resolve_chain(&doc, &default_author_chain()).unwrap(), "Jane Roe");
    }

    #[test]
    fn test_empty_match_moves_to_next_strategy() {
        let html = r#"<html><head><meta name="author" content=""></head>
            <body><a rel="author" href="/me">Linked Author</a></body></html>"#;
        let doc = Document::parse(html);
        assert_eq!(resolve_chain(&doc, &default_author_chain()).unwrap(), "Linked Author");
    }

    #[test]
    fn test_no_author_is_empty_not_error() {
        let doc = Document::parse("<html><body><p>Nothing here</p></body></html>");
        assert_eq!(resolve_chain(&doc, &default_author_chain()).unwrap(), "");
    }

    #[test]
    fn test_date_prefers_meta_over_time() {
        let doc = Document::parse(HTML_WITH_META);
        assert_eq!(resolve_chain(&doc, &default_date_chain()).unwrap(), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_date_from_time_element() {
        let doc = Document::parse(r#"<html><body><time datetime="2024-03-20T14:00:00Z">March 20</time></body></html>"#);
        assert_eq!(resolve_chain(&doc, &default_date_chain()).unwrap(), "2024-03-20T14:00:00Z");
    }

    #[test]
    fn test_date_from_time_text_without_datetime() {
        let doc = Document::parse("<html><body><time> March 20, 2024 </time></body></html>");
        assert_eq!(resolve_chain(&doc, &default_date_chain()).unwrap(), "March 20, 2024");
    }

    #[test]
    fn test_json_ld_is_last_resort() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {"@type": "Article", "author": [{"@type": "Person", "name": "First Author"}], "datePublished": "2023-05-05"}
            </script>
            </head><body></body></html>
        "#;
        let doc = Document::parse(html);
        assert_eq!(resolve_chain(&doc, &default_author_chain()).unwrap(), "First Author");
        assert_eq!(resolve_chain(&doc, &default_date_chain()).unwrap(), "2023-05-05");
    }

    #[test]
    fn test_title_from_document() {
        let doc = Document::parse(HTML_WITH_META);
        assert_eq!(resolve_title(&doc, &default_title_chain()).unwrap(), "Test Page Title");
    }

    #[test]
    fn test_title_falls_back_to_heading() {
        let doc = Document::parse("<html><body><h1> Only\n Heading </h1></body></html>");
        assert_eq!(resolve_title(&doc, &default_title_chain()).unwrap(), "Only Heading");
    }

    #[test]
    fn test_url_prefers_location() {
        let doc = Document::parse_with_url(HTML_WITH_META, "https://example.com/loaded").unwrap();
        assert_eq!(resolve_url(&doc, &default_url_chain()).unwrap(), "https://example.com/loaded");
    }

    #[test]
    fn test_url_falls_back_to_canonical() {
        let doc = Document::parse(HTML_WITH_META);
        assert_eq!(resolve_url(&doc, &default_url_chain()).unwrap(), "https://example.com/canonical");
    }

    #[test]
    fn test_invalid_selector_propagates() {
        let doc = Document::parse(HTML_WITH_META);
        assert!(resolve_chain(&doc, &[Lookup::selector("[[bad")]).is_err());
    }
}
