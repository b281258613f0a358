//! In-memory page tree.
//!
//! [`DomTree`] is an arena of element nodes with explicit parent/child ids.
//! It implements [`PageDocument`] with a small selector matcher, so callers
//! can hand the extractor a synthetic page without going through HTML.
//!
//! Supported selectors: compound selectors built from a tag name, `#id`,
//! `.class`, `[attr]`, `[attr="value"]` and `[attr*="value"]`, optionally
//! joined with commas. Combinators are rejected.
//!
//! # Example
//!
//! ```rust
//! use article_share_core::{DomTree, PageDocument, PageNode};
//!
//! let mut tree = DomTree::new();
//! let body = tree.append_element(None, "body", &[]);
//! let p = tree.append_element(Some(body), "p", &[("class", "lead")]);
//! tree.append_text(p, "Hello");
//!
//! let lead = tree.select_first("p.lead").unwrap().unwrap();
//! assert_eq!(lead.text(), "Hello");
//! ```

use scraper::{ElementRef, Html};

use crate::page::{PageDocument, PageNode};
use crate::{Result, ShareError};

/// One piece of an element's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomContent {
    /// A text run.
    Text(String),
    /// A child element, by node id.
    Element(usize),
}

/// An element node in the tree.
#[derive(Debug, Clone)]
pub struct DomNode {
    /// The lowercase tag name of the element
    pub tag_name: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
    /// Parent node ID (if any)
    pub parent_id: Option<usize>,
    /// Child element IDs
    pub child_ids: Vec<usize>,
    /// Text runs and child elements in document order
    pub content: Vec<DomContent>,
}

/// A DOM tree structure that tracks parent-child relationships
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    nodes: Vec<DomNode>,
    roots: Vec<usize>,
    location: Option<String>,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from HTML, mirroring the element and text structure.
    ///
    /// Comments and processing instructions are dropped.
    pub fn from_html(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut tree = Self::new();
        tree.copy_element(None, parsed.root_element());
        tree
    }

    fn copy_element(&mut self, parent: Option<usize>, element: ElementRef<'_>) {
        let attributes: Vec<(&str, &str)> = element.value().attrs().collect();
        let id = self.append_element(parent, element.value().name(), &attributes);

        for child in (*element).children() {
            if let Some(child_element) = ElementRef::wrap(child) {
                self.copy_element(Some(id), child_element);
            } else if let Some(text) = child.value().as_text() {
                self.append_text(id, text);
            }
        }
    }

    /// Sets the address reported by [`PageDocument::location`].
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    /// Append an element under `parent` and return its id. A missing or
    /// unknown parent makes the element a new root.
    pub fn append_element(&mut self, parent: Option<usize>, tag_name: &str, attributes: &[(&str, &str)]) -> usize {
        let node_id = self.nodes.len();
        let parent = parent.filter(|id| *id < node_id);
        self.nodes.push(DomNode {
            tag_name: tag_name.to_lowercase(),
            attributes: attributes.iter().map(|(k, v)| (k.to_lowercase(), v.to_string())).collect(),
            parent_id: parent,
            child_ids: Vec::new(),
            content: Vec::new(),
        });

        match parent.and_then(|id| self.nodes.get_mut(id)) {
            Some(parent_node) => {
                parent_node.child_ids.push(node_id);
                parent_node.content.push(DomContent::Element(node_id));
            }
            None => self.roots.push(node_id),
        }

        node_id
    }

    /// Append a text run to the element `node_id`. Unknown ids are ignored.
    pub fn append_text(&mut self, node_id: usize, text: &str) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.content.push(DomContent::Text(text.to_string()));
        }
    }

    /// Get a node by ID
    pub fn get_node(&self, id: usize) -> Option<&DomNode> {
        self.nodes.get(id)
    }

    /// Get the parent of a node
    pub fn get_parent(&self, node_id: usize) -> Option<&DomNode> {
        let node = self.nodes.get(node_id)?;
        let parent_id = node.parent_id?;
        self.nodes.get(parent_id)
    }

    /// Get the total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in document (pre-)order.
    fn document_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.child_ids.iter().rev());
            }
        }
        order
    }

    fn collect_text(&self, id: usize, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        for piece in &node.content {
            match piece {
                DomContent::Text(text) => out.push_str(text),
                DomContent::Element(child) => self.collect_text(*child, out),
            }
        }
    }

    fn node_ref(&self, id: usize) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }
}

impl PageDocument for DomTree {
    type Node<'a> = NodeRef<'a>;

    fn title(&self) -> Option<String> {
        self.document_order()
            .into_iter()
            .find(|id| self.nodes[*id].tag_name == "title")
            .map(|id| self.node_ref(id).text())
    }

    fn location(&self) -> Option<String> {
        self.location.clone()
    }

    fn select_all(&self, selector: &str) -> Result<Vec<NodeRef<'_>>> {
        let selectors = SelectorList::parse(selector)?;
        Ok(self
            .document_order()
            .into_iter()
            .filter(|id| selectors.matches(&self.nodes[*id]))
            .map(|id| self.node_ref(id))
            .collect())
    }
}

/// A borrowed handle to a node in a [`DomTree`].
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    tree: &'a DomTree,
    id: usize,
}

impl NodeRef<'_> {
    /// The node id inside its tree.
    pub fn id(&self) -> usize {
        self.id
    }

    fn node(&self) -> &DomNode {
        &self.tree.nodes[self.id]
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl PageNode for NodeRef<'_> {
    fn tag_name(&self) -> String {
        self.node().tag_name.clone()
    }

    fn attr(&self, name: &str) -> Option<String> {
        let name = name.to_lowercase();
        self.node()
            .attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.clone())
    }

    fn text(&self) -> String {
        let mut out = String::new();
        self.tree.collect_text(self.id, &mut out);
        out
    }

    fn parent(&self) -> Option<Self> {
        self.node().parent_id.map(|id| Self { tree: self.tree, id })
    }

    fn children(&self) -> Vec<Self> {
        self.node()
            .child_ids
            .iter()
            .map(|id| Self { tree: self.tree, id: *id })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrMatch {
    Exists,
    Equals(String),
    Contains(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, AttrMatch)>,
}

impl CompoundSelector {
    fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| ShareError::InvalidSelector(format!("{input}: {reason}"));
        let mut selector = Self::default();
        let chars: Vec<char> = input.chars().collect();
        let mut pos = 0;

        let ident = |pos: &mut usize| -> String {
            let start = *pos;
            while *pos < chars.len() && (chars[*pos].is_alphanumeric() || matches!(chars[*pos], '-' | '_' | ':')) {
                *pos += 1;
            }
            chars[start..*pos].iter().collect()
        };

        if chars.first() == Some(&'*') {
            pos += 1;
        } else {
            let tag = ident(&mut pos);
            if !tag.is_empty() {
                selector.tag = Some(tag.to_lowercase());
            }
        }

        while pos < chars.len() {
            match chars[pos] {
                '#' => {
                    pos += 1;
                    let id = ident(&mut pos);
                    if id.is_empty() {
                        return Err(invalid("empty id"));
                    }
                    selector.id = Some(id);
                }
                '.' => {
                    pos += 1;
                    let class = ident(&mut pos);
                    if class.is_empty() {
                        return Err(invalid("empty class"));
                    }
                    selector.classes.push(class);
                }
                '[' => {
                    pos += 1;
                    let name = ident(&mut pos).to_lowercase();
                    if name.is_empty() {
                        return Err(invalid("empty attribute name"));
                    }
                    let close = chars[pos..]
                        .iter()
                        .position(|c| *c == ']')
                        .map(|offset| pos + offset)
                        .ok_or_else(|| invalid("unclosed attribute"))?;
                    let rest: String = chars[pos..close].iter().collect();
                    let matcher = if rest.is_empty() {
                        AttrMatch::Exists
                    } else if let Some(value) = rest.strip_prefix("*=") {
                        AttrMatch::Contains(unquote(value))
                    } else if let Some(value) = rest.strip_prefix('=') {
                        AttrMatch::Equals(unquote(value))
                    } else {
                        return Err(invalid("unsupported attribute operator"));
                    };
                    selector.attrs.push((name, matcher));
                    pos = close + 1;
                }
                c if c.is_whitespace() || matches!(c, '>' | '+' | '~') => {
                    return Err(invalid("combinators are not supported"));
                }
                _ => return Err(invalid("unexpected character")),
            }
        }

        Ok(selector)
    }

    fn matches(&self, node: &DomNode) -> bool {
        let attr = |name: &str| node.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str());

        if self.tag.as_ref().is_some_and(|tag| *tag != node.tag_name) {
            return false;
        }
        if self.id.as_ref().is_some_and(|id| attr("id") != Some(id.as_str())) {
            return false;
        }
        if !self.classes.is_empty() {
            let classes: Vec<&str> = attr("class").unwrap_or_default().split_whitespace().collect();
            if !self.classes.iter().all(|c| classes.contains(&c.as_str())) {
                return false;
            }
        }
        self.attrs.iter().all(|(name, matcher)| match (matcher, attr(name)) {
            (_, None) => false,
            (AttrMatch::Exists, Some(_)) => true,
            (AttrMatch::Equals(expected), Some(value)) => value == expected,
            (AttrMatch::Contains(needle), Some(value)) => !needle.is_empty() && value.contains(needle.as_str()),
        })
    }
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
        .to_string()
}

#[derive(Debug, Clone)]
struct SelectorList(Vec<CompoundSelector>);

impl SelectorList {
    fn parse(input: &str) -> Result<Self> {
        let compounds = input
            .split(',')
            .map(str::trim)
            .map(|part| {
                if part.is_empty() {
                    Err(ShareError::InvalidSelector(format!("{input}: empty selector")))
                } else {
                    CompoundSelector::parse(part)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self(compounds))
    }

    fn matches(&self, node: &DomNode) -> bool {
        self.0.iter().any(|selector| selector.matches(node))
    }
}
