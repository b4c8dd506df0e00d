//! The channel document: everything that ends up inside one `<rss>` root.

mod channel;
mod item;

use std::path::Path;
use std::sync::LazyLock;

use axum::response::Response;

use chrono::{DateTime, Datelike};
use regex::Regex;

use crate::config::{DEFAULT_ENCODING, RSS_VERSION};
use crate::error::{FeedError, Result};
use crate::formatter::Formatter;
use crate::sink::{FeedSink, HttpSink, RenderedFeed};
use crate::types::{Attributes, Node};

pub use item::ItemBuilder;

/// Runs of carriage returns and line feeds.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("valid regex"));

/// Replace every run of line-break characters with a single space.
pub(crate) fn collapse_line_breaks(text: &str) -> String {
    LINE_BREAKS.replace_all(text, " ").into_owned()
}

/// Format a UNIX timestamp as an RFC 2822 date in UTC.
///
/// # Errors
/// Returns `FeedError::InvalidArgument` when the timestamp is outside the
/// years 0 through 9999, which RFC 2822 cannot express.
pub(crate) fn rfc2822(timestamp: i64) -> Result<String> {
    DateTime::from_timestamp(timestamp, 0)
        .filter(|date| (0..=9999).contains(&date.year()))
        .map(|date| date.to_rfc2822())
        .ok_or_else(|| {
            FeedError::InvalidArgument(format!(
                "timestamp {timestamp} cannot be formatted as an RFC 2822 date"
            ))
        })
}

/// An RSS 2.0 channel document.
///
/// Channel fields become direct children of `<channel>`; every item entry
/// gets its own `<item>` wrapper. Both lists keep insertion order and
/// appending never replaces an earlier node with the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    encoding: String,
    pretty_print: bool,
    root_attributes: Attributes,
    channel_attributes: Attributes,
    channel_fields: Vec<Node>,
    items: Vec<Node>,
}

impl Default for Feed {
    fn default() -> Self {
        Self::new()
    }
}

impl Feed {
    /// Create an empty UTF-8 feed with pretty-printing enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_encoding(DEFAULT_ENCODING)
    }

    /// Create an empty feed declaring the given encoding.
    #[must_use]
    pub fn with_encoding(encoding: impl Into<String>) -> Self {
        Self {
            encoding: encoding.into(),
            pretty_print: true,
            root_attributes: Attributes::new(),
            channel_attributes: Attributes::new(),
            channel_fields: Vec::new(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) -> &mut Self {
        self.encoding = encoding.into();
        self
    }

    /// Always `"2.0"`.
    #[must_use]
    pub fn version(&self) -> &'static str {
        RSS_VERSION
    }

    #[must_use]
    pub fn pretty_print(&self) -> bool {
        self.pretty_print
    }

    /// Toggle indented output.
    pub fn set_pretty_print(&mut self, pretty_print: bool) -> &mut Self {
        self.pretty_print = pretty_print;
        self
    }

    #[must_use]
    pub fn root_attributes(&self) -> &Attributes {
        &self.root_attributes
    }

    /// Replace the attributes of `<rss>`.
    ///
    /// The `version` attribute is fixed; a `version` entry here is ignored
    /// when rendering.
    pub fn set_root_attributes(&mut self, attributes: Attributes) -> &mut Self {
        self.root_attributes = attributes;
        self
    }

    #[must_use]
    pub fn channel_attributes(&self) -> &Attributes {
        &self.channel_attributes
    }

    /// Replace the attributes of `<channel>`.
    pub fn set_channel_attributes(&mut self, attributes: Attributes) -> &mut Self {
        self.channel_attributes = attributes;
        self
    }

    /// Append a node as a direct child of `<channel>`.
    pub fn add_channel_field(&mut self, node: impl Into<Node>) -> &mut Self {
        self.channel_fields.push(node.into());
        self
    }

    /// Append one `<item>`.
    ///
    /// A group contributes its children to the `<item>` (its own name is not
    /// rendered); a single element becomes the only child of the `<item>`.
    pub fn add_item(&mut self, item: impl Into<Node>) -> &mut Self {
        self.items.push(item.into());
        self
    }

    #[must_use]
    pub fn channel_fields(&self) -> &[Node] {
        &self.channel_fields
    }

    #[must_use]
    pub fn items(&self) -> &[Node] {
        &self.items
    }

    /// Render with the given formatter.
    pub fn render(&self, formatter: &Formatter) -> Result<RenderedFeed> {
        let xml = formatter.render(self)?;
        Ok(RenderedFeed::new(xml, &self.encoding))
    }

    /// Render, write the feed to `path` and build the HTTP response for it.
    ///
    /// The response carries the base name of `path` in its
    /// `Content-Disposition` header.
    ///
    /// # Errors
    /// Rendering errors as for [`Feed::render`], and
    /// `FeedError::FilesystemWrite` if the file cannot be written. Use
    /// [`Feed::render`] with [`RenderedFeed::save`] to keep the XML after a
    /// failed write.
    pub fn render_to(&self, path: impl AsRef<Path>, formatter: &Formatter) -> Result<Response> {
        let path = path.as_ref();
        let rendered = self.render(formatter)?;
        rendered.save(path)?;
        HttpSink::for_path(path).accept(&rendered)
    }
}
