//! Output sinks for rendered feeds.
//!
//! Rendering produces a [`RenderedFeed`]; sinks only borrow it, so the XML
//! stays available after a sink fails.

mod file;
mod http;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::content_type;
use crate::error::Result;

pub use file::FileSink;
pub use http::HttpSink;

/// Destination for a rendered feed.
pub trait FeedSink {
    /// What the sink hands back on success.
    type Output;

    /// Deliver the feed.
    fn accept(&self, feed: &RenderedFeed) -> Result<Self::Output>;
}

/// The serialized XML of one feed together with its declared encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFeed {
    xml: String,
    encoding: String,
}

impl RenderedFeed {
    #[must_use]
    pub fn new(xml: String, encoding: &str) -> Self {
        Self {
            xml,
            encoding: encoding.to_string(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.xml
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.xml.as_bytes()
    }

    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// `Content-Type` value for serving this feed.
    #[must_use]
    pub fn content_type(&self) -> String {
        content_type(&self.encoding)
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.xml
    }

    /// Write the feed to `path` with a [`FileSink`].
    ///
    /// # Errors
    /// Returns `FeedError::FilesystemWrite` if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        FileSink::new(path.as_ref()).accept(self)
    }
}

impl fmt::Display for RenderedFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.xml)
    }
}
