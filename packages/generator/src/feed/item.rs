//! Builder for the fields of one `<item>`.

use super::{collapse_line_breaks, rfc2822};
use crate::error::Result;
use crate::types::{Element, ElementGroup, Node};

/// Collects the fields of a single feed entry in call order.
///
/// # Examples
/// ```
/// use rss_feed_generator::{Feed, ItemBuilder};
///
/// let item = ItemBuilder::new()
///     .title("Release 1.0")?
///     .link("https://example.com/1.0")?
///     .pub_date(1_700_000_000)?
///     .build()?;
///
/// let mut feed = Feed::new();
/// feed.add_item(item);
/// assert_eq!(feed.items().len(), 1);
/// # Ok::<(), rss_feed_generator::FeedError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ItemBuilder {
    fields: Vec<Node>,
}

impl ItemBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn text(self, name: &str, value: &str) -> Result<Self> {
        Ok(self.field(Element::new(name, value)?))
    }

    pub fn title(self, title: &str) -> Result<Self> {
        self.text("title", title)
    }

    pub fn link(self, link: &str) -> Result<Self> {
        self.text("link", link)
    }

    /// `<description>` wrapped in CDATA, with line breaks collapsed.
    pub fn description(self, description: &str) -> Result<Self> {
        let element = Element::new("description", collapse_line_breaks(description))?;
        Ok(self.field(element.with_cdata(true)))
    }

    pub fn author(self, email: &str) -> Result<Self> {
        self.text("author", email)
    }

    pub fn category(self, category: &str) -> Result<Self> {
        self.text("category", category)
    }

    pub fn comments(self, url: &str) -> Result<Self> {
        self.text("comments", url)
    }

    /// Attribute-only `<enclosure url length type/>`.
    pub fn enclosure(self, url: &str, length: u64, mime_type: &str) -> Result<Self> {
        let element = Element::empty("enclosure")?.with_attributes([
            ("url", url.to_string()),
            ("length", length.to_string()),
            ("type", mime_type.to_string()),
        ]);
        Ok(self.field(element))
    }

    /// `<guid>`; `isPermaLink="false"` is written when the value is not a URL.
    pub fn guid(self, value: &str, permalink: bool) -> Result<Self> {
        let mut element = Element::new("guid", value)?;
        if !permalink {
            element = element.with_attribute("isPermaLink", "false");
        }
        Ok(self.field(element))
    }

    /// `<pubDate>` formatted from a UNIX timestamp.
    pub fn pub_date(self, timestamp: i64) -> Result<Self> {
        let date = rfc2822(timestamp)?;
        self.text("pubDate", &date)
    }

    /// `<source url="...">name</source>`.
    pub fn source(self, url: &str, name: &str) -> Result<Self> {
        let element = Element::new("source", name)?.with_attribute("url", url);
        Ok(self.field(element))
    }

    /// Any other text field.
    pub fn additional(self, tag: &str, value: &str) -> Result<Self> {
        self.text(tag, value)
    }

    /// Append a prepared node.
    #[must_use]
    pub fn field(mut self, node: impl Into<Node>) -> Self {
        self.fields.push(node.into());
        self
    }

    /// Finish the `<item>` group.
    ///
    /// # Errors
    /// Returns `FeedError::InvalidArgument` when no field was added.
    pub fn build(self) -> Result<ElementGroup> {
        ElementGroup::new("item", self.fields)
    }
}
