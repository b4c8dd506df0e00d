//! Renders a [`Feed`] into RSS 2.0 XML.
//!
//! Rendering happens in two passes. The feed's nodes are first turned into an
//! [`XmlDocument`] tree, running the filter pass over every element's text on
//! the way; the finished tree is then serialized in one go. A failure in the
//! first pass therefore never leaves partial output behind.

use crate::config::{validate_encoding, FeedConfig, GENERATOR_COMMENT, RSS_VERSION};
use crate::error::Result;
use crate::feed::Feed;
use crate::filter::{self, FilterTable};
use crate::types::{Attributes, Element, ElementGroup, Node};
use crate::xml::{to_xml_string, XmlDocument, XmlElement};

/// Turns feeds into XML using a default filter table.
///
/// The formatter holds no per-render state, so one instance can render any
/// number of feeds and be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    filter: FilterTable,
}

impl Formatter {
    /// Create a formatter whose default filter table is `filter`.
    #[must_use]
    pub fn new(filter: FilterTable) -> Self {
        Self { filter }
    }

    /// Create a formatter from a loaded configuration.
    ///
    /// # Errors
    /// Returns `FeedError::InvalidFilterPattern` if a configured pattern
    /// does not compile.
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        Ok(Self::new(config.filter_table()?))
    }

    /// The table used for elements without a local filter.
    #[must_use]
    pub fn filter(&self) -> &FilterTable {
        &self.filter
    }

    /// Render a feed to an XML string.
    ///
    /// # Errors
    /// Returns `FeedError::UnsupportedEncoding` for a non UTF-8 encoding,
    /// `FeedError::InvalidName` or `FeedError::InvalidCharacter` when a node
    /// cannot be represented in XML 1.0, and `FeedError::Serialization` if
    /// writing fails.
    ///
    /// # Examples
    /// ```
    /// use rss_feed_generator::{Feed, Formatter};
    ///
    /// let mut feed = Feed::new();
    /// feed.add_title("Releases")?;
    ///
    /// let xml = Formatter::default().render(&feed)?;
    /// assert!(xml.contains("<title>Releases</title>"));
    /// # Ok::<(), rss_feed_generator::FeedError>(())
    /// ```
    pub fn render(&self, feed: &Feed) -> Result<String> {
        let document = self.build_document(feed)?;
        to_xml_string(&document, feed.pretty_print())
    }

    /// Build the XML tree for a feed without serializing it.
    pub fn build_document(&self, feed: &Feed) -> Result<XmlDocument> {
        validate_encoding(feed.encoding())?;
        tracing::debug!(
            encoding = feed.encoding(),
            channel_fields = feed.channel_fields().len(),
            items = feed.items().len(),
            "Rendering feed"
        );

        let mut rss = XmlElement::new("rss")?;
        rss.set_attribute("version", RSS_VERSION)?;
        for (name, value) in feed.root_attributes() {
            if name == "version" {
                tracing::warn!(value = %value, "Ignoring 'version' root attribute");
                continue;
            }
            rss.set_attribute(name, value)?;
        }

        let mut channel = XmlElement::new("channel")?;
        apply_attributes(&mut channel, feed.channel_attributes())?;

        for node in feed.channel_fields() {
            channel.append_child(self.render_node(node)?);
        }
        for entry in feed.items() {
            channel.append_child(self.render_item(entry)?);
        }

        rss.append_child(channel);
        XmlDocument::new(feed.encoding(), rss).with_comment(GENERATOR_COMMENT)
    }

    /// Wrap one item entry in `<item>`.
    ///
    /// A group's children (and attributes) land directly on the `<item>`; its
    /// own name is not rendered. A single element becomes the only child.
    fn render_item(&self, entry: &Node) -> Result<XmlElement> {
        let mut item = XmlElement::new("item")?;
        match entry {
            Node::Group(group) => {
                apply_attributes(&mut item, group.attributes())?;
                for child in group.children() {
                    item.append_child(self.render_node(child)?);
                }
            }
            Node::Element(element) => item.append_child(self.render_element(element)?),
        }
        Ok(item)
    }

    fn render_node(&self, node: &Node) -> Result<XmlElement> {
        match node {
            Node::Element(element) => self.render_element(element),
            Node::Group(group) => self.render_group(group),
        }
    }

    fn render_group(&self, group: &ElementGroup) -> Result<XmlElement> {
        let mut xml = XmlElement::new(group.name())?;
        apply_attributes(&mut xml, group.attributes())?;
        for child in group.children() {
            xml.append_child(self.render_node(child)?);
        }
        Ok(xml)
    }

    fn render_element(&self, element: &Element) -> Result<XmlElement> {
        let mut xml = XmlElement::new(element.name())?;
        apply_attributes(&mut xml, element.attributes())?;

        let Some(content) = element.content() else {
            return Ok(xml);
        };

        let options = element.options();
        let text = filter::resolve(options.filter.as_ref(), &self.filter).apply(content);
        if text.is_empty() {
            return Ok(xml);
        }

        if options.cdata {
            xml.append_cdata(&text)?;
        } else {
            xml.append_text(&text)?;
        }
        Ok(xml)
    }
}

fn apply_attributes(xml: &mut XmlElement, attributes: &Attributes) -> Result<()> {
    for (name, value) in attributes {
        xml.set_attribute(name, value)?;
    }
    Ok(())
}
