//! Configuration constants and the YAML filter configuration.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;

use crate::error::{FeedError, Result};
use crate::filter::FilterTable;

/// Encoding declared when the caller does not pick one.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// RSS version written on the `<rss>` root. Not configurable.
pub const RSS_VERSION: &str = "2.0";

/// XML version written in the declaration.
pub const XML_VERSION: &str = "1.0";

/// Comment placed before the root element of every rendered feed.
pub const GENERATOR_COMMENT: &str = concat!(
    "Generated with ",
    env!("CARGO_PKG_NAME"),
    ". See ",
    env!("CARGO_PKG_REPOSITORY")
);

/// Media type of rendered feeds.
pub const RSS_MEDIA_TYPE: &str = "application/rss+xml";

/// Number of spaces per nesting level in pretty-printed output.
pub const INDENT_WIDTH: usize = 2;

/// Default filter table, applied in this order.
///
/// `[-]` and `&shy;` are soft-hyphen markers and are dropped, `[nbsp]` and
/// `&nbsp;` become a plain space. Markup characters are left alone: the
/// writer escapes text itself and CDATA keeps its payload verbatim.
pub const DEFAULT_FILTERS: &[(&str, &str)] = &[
    (r"\[-\]", ""),
    ("&shy;", ""),
    (r"\[nbsp\]", " "),
    ("&nbsp;", " "),
];

/// Encoding labels that name UTF-8.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static UTF8_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^utf-?8$").expect("valid regex"));

/// Validate that an encoding label names UTF-8.
///
/// Output is always produced as UTF-8, so declaring anything else would
/// mislabel the document.
///
/// # Examples
/// ```
/// use rss_feed_generator::config::validate_encoding;
///
/// assert!(validate_encoding("utf-8").is_ok());
/// assert!(validate_encoding("UTF8").is_ok());
/// assert!(validate_encoding("iso-8859-1").is_err());
/// ```
pub fn validate_encoding(encoding: &str) -> Result<()> {
    if UTF8_LABEL.is_match(encoding) {
        Ok(())
    } else {
        Err(FeedError::UnsupportedEncoding(encoding.to_string()))
    }
}

/// Build the `Content-Type` header value for a feed.
///
/// # Examples
/// ```
/// use rss_feed_generator::config::content_type;
///
/// assert_eq!(content_type("utf-8"), "application/rss+xml; charset=utf-8");
/// ```
pub fn content_type(encoding: &str) -> String {
    format!("{RSS_MEDIA_TYPE}; charset={encoding}")
}

fn default_filter() -> IndexMap<String, String> {
    DEFAULT_FILTERS
        .iter()
        .map(|(pattern, replacement)| ((*pattern).to_string(), (*replacement).to_string()))
        .collect()
}

/// Startup configuration supplying the default filter table.
///
/// ```yaml
/// filter:
///   '\[nbsp\]': ' '
///   '&shy;': ''
/// ```
///
/// A missing `filter` key falls back to [`DEFAULT_FILTERS`]; an explicit
/// empty mapping disables filtering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    #[serde(default = "default_filter")]
    pub filter: IndexMap<String, String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl FeedConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml)?;
        tracing::debug!(
            path = %path.display(),
            filters = config.filter.len(),
            "Loaded filter configuration"
        );
        Ok(config)
    }

    /// Compile the configured filter mapping.
    pub fn filter_table(&self) -> Result<FilterTable> {
        FilterTable::new(self.filter.iter())
    }
}
