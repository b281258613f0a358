//! Read-only document access.
//!
//! The extractor never touches a concrete HTML library directly. It walks
//! pages through [`PageDocument`] and [`PageNode`], which expose only what the
//! heuristics need: selector queries, attribute and text reads, and
//! parent/child relationships.
//!
//! Two backends ship with the crate:
//!
//! - [`Document`](crate::Document), backed by `scraper`, for real HTML;
//! - [`DomTree`](crate::DomTree), an in-memory tree for synthetic pages.

use crate::Result;

/// A single element of a page.
///
/// Equality must identify the same element in the same document; the
/// densest-parent tier relies on it to group paragraphs.
pub trait PageNode: Clone + PartialEq {
    /// Lowercase tag name (e.g. `"p"`, `"meta"`).
    fn tag_name(&self) -> String;

    /// Attribute value, if present.
    fn attr(&self, name: &str) -> Option<String>;

    /// Concatenated text of every descendant text node, in document order.
    fn text(&self) -> String;

    /// The immediate parent element, if any.
    fn parent(&self) -> Option<Self>;

    /// Child elements in document order (text nodes are skipped).
    fn children(&self) -> Vec<Self>;
}

/// A traversable page.
pub trait PageDocument {
    /// Element handle borrowed from the document.
    type Node<'a>: PageNode
    where
        Self: 'a;

    /// The document title, as the `<title>` element reports it.
    fn title(&self) -> Option<String>;

    /// The address the document was loaded from, when known.
    fn location(&self) -> Option<String>;

    /// All elements matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::InvalidSelector`](crate::ShareError::InvalidSelector)
    /// when the backend cannot interpret the selector.
    fn select_all(&self, selector: &str) -> Result<Vec<Self::Node<'_>>>;

    /// The first element matching `selector`.
    fn select_first(&self, selector: &str) -> Result<Option<Self::Node<'_>>> {
        Ok(self.select_all(selector)?.into_iter().next())
    }
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  hello \n\t world  "), "hello world");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n "), "");
    }

    #[test]
    fn test_normalize_whitespace_unicode_spaces() {
        assert_eq!(normalize_whitespace("a\u{00a0}\u{2003}b"), "a b");
    }
}
