//! Core data types for feed trees.
//!
//! A feed is built from two kinds of nodes: [`Element`] leaves carrying text
//! and [`ElementGroup`] containers owning an ordered list of child nodes.
//! [`Node`] is the closed sum of both, which keeps the formatter exhaustive.

use indexmap::IndexMap;

use crate::error::{FeedError, Result};
use crate::filter::FilterTable;

/// Attribute name -> value, in insertion order.
pub type Attributes = IndexMap<String, String>;

/// Per-element rendering options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementOptions {
    /// Wrap the content in a CDATA section instead of escaped text.
    pub cdata: bool,

    /// Replaces the formatter's default filter table for this element only.
    pub filter: Option<FilterTable>,
}

/// Leaf node: a named element with optional text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    content: Option<String>,
    options: ElementOptions,
    attributes: Attributes,
}

impl Element {
    /// Create an element with text content.
    ///
    /// # Errors
    /// Returns `FeedError::InvalidArgument` if `name` is empty.
    ///
    /// # Examples
    /// ```
    /// use rss_feed_generator::types::Element;
    ///
    /// let title = Element::new("title", "My Feed").unwrap();
    /// assert_eq!(title.name(), "title");
    /// assert_eq!(title.content(), Some("My Feed"));
    /// assert!(Element::new("", "x").is_err());
    /// ```
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Result<Self> {
        Self::build(name.into(), Some(content.into()))
    }

    /// Create an element without text content, e.g. `<enclosure url="..."/>`.
    pub fn empty(name: impl Into<String>) -> Result<Self> {
        Self::build(name.into(), None)
    }

    fn build(name: String, content: Option<String>) -> Result<Self> {
        if name.is_empty() {
            return Err(FeedError::InvalidArgument(
                "element name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name,
            content,
            options: ElementOptions::default(),
            attributes: Attributes::new(),
        })
    }

    /// Set whether the content is wrapped in CDATA.
    #[must_use]
    pub fn with_cdata(mut self, cdata: bool) -> Self {
        self.options.cdata = cdata;
        self
    }

    /// Set a local filter table that overrides the default one.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterTable) -> Self {
        self.options.filter = Some(filter);
        self
    }

    /// Replace all options at once.
    #[must_use]
    pub fn with_options(mut self, options: ElementOptions) -> Self {
        self.options = options;
        self
    }

    /// Add or replace an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add attributes in iteration order.
    #[must_use]
    pub fn with_attributes<K, V>(mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content; `None` when absent or empty.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    #[must_use]
    pub fn options(&self) -> &ElementOptions {
        &self.options
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// Composite node: a named element owning a non-empty list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementGroup {
    name: String,
    children: Vec<Node>,
    attributes: Attributes,
}

impl ElementGroup {
    /// Create a group from a single node or a list of nodes.
    ///
    /// # Errors
    /// Returns `FeedError::InvalidArgument` if `name` is empty or the
    /// children list is empty.
    ///
    /// # Examples
    /// ```
    /// use rss_feed_generator::types::{Element, ElementGroup, Node};
    ///
    /// let url = Element::new("url", "https://example.com/logo.png").unwrap();
    /// let image = ElementGroup::new("image", url).unwrap();
    /// assert_eq!(image.children().len(), 1);
    ///
    /// assert!(ElementGroup::new("image", Vec::<Node>::new()).is_err());
    /// ```
    pub fn new(name: impl Into<String>, children: impl Into<Children>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(FeedError::InvalidArgument(
                "group name must not be empty".to_string(),
            ));
        }

        let Children(children) = children.into();
        if children.is_empty() {
            return Err(FeedError::InvalidArgument(format!(
                "group <{name}> needs a node or a non-empty list of nodes"
            )));
        }

        Ok(Self {
            name,
            children,
            attributes: Attributes::new(),
        })
    }

    /// Add or replace an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add attributes in iteration order.
    #[must_use]
    pub fn with_attributes<K, V>(mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// A feed tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Group(ElementGroup),
}

impl Node {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Element(element) => element.name(),
            Self::Group(group) => group.name(),
        }
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        match self {
            Self::Element(element) => element.attributes(),
            Self::Group(group) => group.attributes(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<ElementGroup> for Node {
    fn from(group: ElementGroup) -> Self {
        Self::Group(group)
    }
}

/// Children argument of [`ElementGroup::new`].
///
/// Built from a single node (normalized to a one-element list) or from a
/// list of nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(Vec<Node>);

impl Children {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Node> for Children {
    fn from(node: Node) -> Self {
        Self(vec![node])
    }
}

impl From<Element> for Children {
    fn from(element: Element) -> Self {
        Self(vec![Node::Element(element)])
    }
}

impl From<ElementGroup> for Children {
    fn from(group: ElementGroup) -> Self {
        Self(vec![Node::Group(group)])
    }
}

impl From<Vec<Node>> for Children {
    fn from(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }
}

impl From<Vec<Element>> for Children {
    fn from(elements: Vec<Element>) -> Self {
        Self(elements.into_iter().map(Node::Element).collect())
    }
}

impl FromIterator<Node> for Children {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_defaults() {
        let element = Element::new("title", "My Feed").unwrap();
        assert_eq!(element.name(), "title");
        assert_eq!(element.content(), Some("My Feed"));
        assert!(!element.options().cdata);
        assert!(element.options().filter.is_none());
        assert!(element.attributes().is_empty());
    }

    #[test]
    fn test_element_empty_content_is_absent() {
        assert_eq!(Element::new("title", "").unwrap().content(), None);
        assert_eq!(Element::empty("enclosure").unwrap().content(), None);
    }

    #[test]
    fn test_element_rejects_empty_name() {
        assert!(matches!(
            Element::new("", "x"),
            Err(FeedError::InvalidArgument(_))
        ));
        assert!(Element::empty("").is_err());
    }

    #[test]
    fn test_element_builder_methods() {
        let filter = FilterTable::new([("a", "b")]).unwrap();
        let element = Element::new("description", "text")
            .unwrap()
            .with_cdata(true)
            .with_filter(filter.clone())
            .with_attribute("type", "html");

        assert!(element.options().cdata);
        assert_eq!(element.options().filter.as_ref(), Some(&filter));
        assert_eq!(element.attributes().get("type").map(String::as_str), Some("html"));
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let element = Element::empty("enclosure")
            .unwrap()
            .with_attributes([("url", "u"), ("length", "1"), ("type", "audio/mpeg")]);
        let names: Vec<&str> = element.attributes().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["url", "length", "type"]);
    }

    #[test]
    fn test_group_single_node_is_normalized() {
        let group = ElementGroup::new("image", Element::new("url", "u").unwrap()).unwrap();
        assert_eq!(group.children().len(), 1);
        assert_eq!(group.children()[0].name(), "url");
    }

    #[test]
    fn test_group_keeps_child_order() {
        let children = vec![
            Node::from(Element::new("url", "u").unwrap()),
            Node::from(Element::new("title", "t").unwrap()),
            Node::from(Element::new("link", "l").unwrap()),
        ];
        let group = ElementGroup::new("image", children).unwrap();
        let names: Vec<&str> = group.children().iter().map(Node::name).collect();
        assert_eq!(names, vec!["url", "title", "link"]);
    }

    #[test]
    fn test_group_rejects_empty_children() {
        let err = ElementGroup::new("image", Vec::<Node>::new()).unwrap_err();
        assert!(matches!(err, FeedError::InvalidArgument(_)));
        assert!(err.to_string().contains("<image>"));
    }

    #[test]
    fn test_group_rejects_empty_name() {
        assert!(ElementGroup::new("", Element::new("a", "b").unwrap()).is_err());
    }

    #[test]
    fn test_nested_groups() {
        let inner = ElementGroup::new("inner", Element::new("leaf", "x").unwrap()).unwrap();
        let outer = ElementGroup::new("outer", inner).unwrap();

        match &outer.children()[0] {
            Node::Group(group) => assert_eq!(group.name(), "inner"),
            Node::Element(_) => panic!("expected a group"),
        }
    }
}
