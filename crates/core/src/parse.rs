//! HTML parsing backed by `scraper`.
//!
//! This module provides the [`Document`] and [`Element`] types, the
//! production implementation of [`PageDocument`] and [`PageNode`].
//!
//! # Example
//!
//! ```rust
//! use article_share_core::{Document, PageDocument, PageNode};
//!
//! let html = r#"
//!     <html>
//!         <head><title>Title</title></head>
//!         <body><p class="content">Paragraph</p></body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert_eq!(doc.title(), Some("Title".to_string()));
//! let paragraphs = doc.select_all("p.content").unwrap();
//! assert_eq!(paragraphs[0].text(), "Paragraph");
//! ```

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::page::{PageDocument, PageNode};
use crate::{Result, ShareError};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and, optionally, the URL it was loaded
/// from. The URL is what the extractor reports as the article address.
pub struct Document {
    html: Html,
    url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// HTML parsing is lenient; malformed markup still yields a document.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html), url: None }
    }

    /// Parses HTML and records the URL it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::InvalidUrl`] if the URL cannot be parsed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use article_share_core::{Document, PageDocument};
    ///
    /// let doc = Document::parse_with_url("<p>Hi</p>", "https://example.com/post").unwrap();
    /// assert_eq!(doc.location(), Some("https://example.com/post".to_string()));
    /// ```
    pub fn parse_with_url(html: &str, url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| ShareError::InvalidUrl(e.to_string()))?;
        Ok(Self { html: Html::parse_document(html), url: Some(url) })
    }

    /// Gets the URL used when parsing, if one was provided.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Gets all text content from the document.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }
}

impl PageDocument for Document {
    type Node<'a> = Element<'a>;

    fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    fn location(&self) -> Option<String> {
        self.url.as_ref().map(|u| u.to_string())
    }

    fn select_all(&self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(Element::new).collect())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ShareError::InvalidSelector(format!("{selector}: {e}")))
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use article_share_core::{Document, PageDocument, PageNode};
///
/// let doc = Document::parse(r#"<a href="https://example.com">Link text</a>"#);
/// let link = doc.select_first("a").unwrap().unwrap();
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com".to_string()));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        (*self.element).id() == (*other.element).id()
    }
}

impl<'a> PageNode for Element<'a> {
    fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.element.value().attr(name).map(str::to_string)
    }

    fn text(&self) -> String {
        self.element.text().collect()
    }

    fn parent(&self) -> Option<Self> {
        (*self.element).parent().and_then(ElementRef::wrap).map(Element::new)
    }

    fn children(&self) -> Vec<Self> {
        (*self.element).children().filter_map(ElementRef::wrap).map(Element::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
        </head>
        <body>
            <h1>Heading</h1>
            <div id="wrap">
                <p class="content">Paragraph 1</p>
                <p class="content">Paragraph 2</p>
            </div>
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.title(), Some("Test Page".to_string()));
        assert_eq!(doc.location(), None);
    }

    #[test]
    fn test_parse_with_url() {
        let doc = Document::parse_with_url(SAMPLE_HTML, "https://example.com/a").unwrap();
        assert_eq!(doc.location(), Some("https://example.com/a".to_string()));
    }

    #[test]
    fn test_parse_with_invalid_url() {
        let result = Document::parse_with_url(SAMPLE_HTML, "not a url");
        assert!(matches!(result, Err(ShareError::InvalidUrl(_))));
    }

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML);
        let elements = doc.select_all("p.content").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
        assert_eq!(elements[1].text(), "Paragraph 2");
    }

    #[test]
    fn test_element_attributes() {
        let doc = Document::parse(SAMPLE_HTML);
        let link = doc.select_first("a").unwrap().unwrap();

        assert_eq!(link.attr("href"), Some("https://example.com".to_string()));
        assert_eq!(link.attr("rel"), None);
        assert_eq!(link.tag_name(), "a");
    }

    #[test]
    fn test_parent_and_children() {
        let doc = Document::parse(SAMPLE_HTML);
        let paragraphs = doc.select_all("p").unwrap();
        let parent = paragraphs[0].parent().unwrap();

        assert_eq!(parent.attr("id"), Some("wrap".to_string()));
        assert_eq!(paragraphs[1].parent(), Some(parent.clone()));
        assert_eq!(parent.children().len(), 2);
    }

    #[test]
    fn test_root_has_no_element_parent() {
        let doc = Document::parse(SAMPLE_HTML);
        let html = doc.select_first("html").unwrap().unwrap();
        assert!(html.parent().is_none());
    }

    #[test]
    fn test_element_equality_is_identity() {
        let doc = Document::parse(SAMPLE_HTML);
        let paragraphs = doc.select_all("p").unwrap();
        assert_ne!(paragraphs[0], paragraphs[1]);
        assert_eq!(paragraphs[0], doc.select_first("p").unwrap().unwrap());
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML);
        let result = doc.select_all("[[invalid");

        assert!(matches!(result, Err(ShareError::InvalidSelector(_))));
    }

    #[test]
    fn test_text_content() {
        let doc = Document::parse(SAMPLE_HTML);
        let text = doc.text_content();

        assert!(text.contains("Heading"));
        assert!(text.contains("Paragraph 1"));
    }
}
