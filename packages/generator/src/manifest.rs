//! YAML description of a complete feed.
//!
//! ```yaml
//! encoding: utf-8
//! pretty_print: true
//! root_attributes:
//!   xmlns:atom: http://www.w3.org/2005/Atom
//! channel:
//!   - name: title
//!     content: My Feed
//!   - name: image
//!     children:
//!       - { name: url, content: "https://example.com/logo.png" }
//!       - { name: title, content: My Feed }
//!       - { name: link, content: "https://example.com" }
//! items:
//!   - - name: title
//!       content: Item 1
//!     - name: description
//!       content: "<p>Hello</p>"
//!       cdata: true
//! ```
//!
//! A node with `children` is a group, anything else is a leaf element.

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::config::DEFAULT_ENCODING;
use crate::error::Result;
use crate::feed::Feed;
use crate::filter::FilterTable;
use crate::types::{Attributes, Children, Element, ElementGroup, Node};

/// Top-level manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedManifest {
    #[serde(default = "default_encoding")]
    pub encoding: String,

    #[serde(default = "default_pretty_print")]
    pub pretty_print: bool,

    #[serde(default)]
    pub root_attributes: IndexMap<String, Scalar>,

    #[serde(default)]
    pub channel_attributes: IndexMap<String, Scalar>,

    /// Direct children of `<channel>`.
    #[serde(default)]
    pub channel: Vec<NodeManifest>,

    /// One node list per `<item>`.
    #[serde(default)]
    pub items: Vec<Vec<NodeManifest>>,
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

fn default_pretty_print() -> bool {
    true
}

impl Default for FeedManifest {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            pretty_print: default_pretty_print(),
            root_attributes: IndexMap::new(),
            channel_attributes: IndexMap::new(),
            channel: Vec::new(),
            items: Vec::new(),
        }
    }
}

/// A node entry: group when it has `children`, leaf otherwise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NodeManifest {
    Group(GroupManifest),
    Element(ElementManifest),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupManifest {
    pub name: String,
    pub children: OneOrMany<NodeManifest>,
    #[serde(default)]
    pub attributes: IndexMap<String, Scalar>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementManifest {
    pub name: String,
    #[serde(default)]
    pub content: Option<Scalar>,
    #[serde(default)]
    pub cdata: bool,
    /// Local filter table; replaces the default one when non-empty.
    #[serde(default)]
    pub filter: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub attributes: IndexMap<String, Scalar>,
}

/// A single node or a list of nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(Box<T>),
}

/// A YAML scalar used as text. Numbers and booleans keep their YAML spelling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

fn to_attributes(map: IndexMap<String, Scalar>) -> Attributes {
    map.into_iter()
        .map(|(name, value)| (name, value.to_string()))
        .collect()
}

impl NodeManifest {
    /// Convert into a feed node.
    ///
    /// # Errors
    /// Returns `FeedError::InvalidArgument` for an empty name or an empty
    /// `children` list and `FeedError::InvalidFilterPattern` for a bad local
    /// filter.
    pub fn into_node(self) -> Result<Node> {
        match self {
            Self::Group(group) => group.into_group().map(Node::Group),
            Self::Element(element) => element.into_element().map(Node::Element),
        }
    }
}

impl GroupManifest {
    fn into_group(self) -> Result<ElementGroup> {
        let children: Children = match self.children {
            OneOrMany::One(node) => node.into_node()?.into(),
            OneOrMany::Many(nodes) => nodes
                .into_iter()
                .map(NodeManifest::into_node)
                .collect::<Result<Vec<_>>>()?
                .into(),
        };
        Ok(ElementGroup::new(self.name, children)?.with_attributes(to_attributes(self.attributes)))
    }
}

impl ElementManifest {
    fn into_element(self) -> Result<Element> {
        let content = self.content.map(|c| c.to_string());
        let mut element = match content {
            Some(content) => Element::new(self.name, content)?,
            None => Element::empty(self.name)?,
        };

        if let Some(filter) = self.filter {
            element = element.with_filter(FilterTable::new(filter.iter())?);
        }
        Ok(element
            .with_cdata(self.cdata)
            .with_attributes(to_attributes(self.attributes)))
    }
}

impl FeedManifest {
    /// Parse a manifest from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a manifest from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        let manifest = Self::from_yaml_str(&yaml)?;
        tracing::debug!(
            path = %path.display(),
            channel_fields = manifest.channel.len(),
            items = manifest.items.len(),
            "Loaded feed manifest"
        );
        Ok(manifest)
    }

    /// Build the feed this manifest describes.
    ///
    /// # Errors
    /// Fails when a node cannot be built (see [`NodeManifest::into_node`]),
    /// including an item with no nodes.
    pub fn into_feed(self) -> Result<Feed> {
        let mut feed = Feed::with_encoding(self.encoding);
        feed.set_pretty_print(self.pretty_print)
            .set_root_attributes(to_attributes(self.root_attributes))
            .set_channel_attributes(to_attributes(self.channel_attributes));

        for node in self.channel {
            feed.add_channel_field(node.into_node()?);
        }
        for item in self.items {
            let nodes = item
                .into_iter()
                .map(NodeManifest::into_node)
                .collect::<Result<Vec<_>>>()?;
            feed.add_item(ElementGroup::new("item", nodes)?);
        }
        Ok(feed)
    }
}
