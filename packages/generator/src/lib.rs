//! RSS feed generator - Build RSS 2.0 documents from element trees.
//!
//! A [`Feed`] holds channel fields and items as trees of [`Element`] and
//! [`ElementGroup`] nodes. A [`Formatter`] runs the filter pass over element
//! text and serializes the tree; the resulting [`RenderedFeed`] can be written
//! to a file or returned as an HTTP response.
//!
//! # Example
//!
//! ```
//! use rss_feed_generator::{Feed, Formatter, ItemBuilder};
//!
//! let mut feed = Feed::new();
//! feed.add_title("Release notes")?
//!     .add_link("https://example.com")?
//!     .add_description("All releases")?;
//! feed.add_item(
//!     ItemBuilder::new()
//!         .title("1.0")?
//!         .link("https://example.com/1.0")?
//!         .build()?,
//! );
//!
//! let rendered = feed.render(&Formatter::default())?;
//! assert!(rendered.as_str().contains("<item>"));
//! # Ok::<(), rss_feed_generator::FeedError>(())
//! ```
//!
//! # Architecture
//!
//! - [`types`]: Element, ElementGroup and Node
//! - [`filter`]: Regex substitution tables for element text
//! - [`feed`]: The channel document and its builder helpers
//! - [`formatter`]: Tree rendering and serialization
//! - [`xml`]: XML tree, writer and read-back helpers
//! - [`sink`]: File and HTTP outputs
//! - [`config`]: Constants and the YAML filter configuration
//! - [`manifest`]: YAML feed manifests
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod formatter;
pub mod manifest;
pub mod sink;
pub mod types;
pub mod xml;

// Re-export commonly used items
pub use config::FeedConfig;
pub use error::{FeedError, Result};
pub use feed::{Feed, ItemBuilder};
pub use filter::FilterTable;
pub use formatter::Formatter;
pub use manifest::FeedManifest;
pub use sink::{FeedSink, FileSink, HttpSink, RenderedFeed};
pub use types::{Element, ElementGroup, ElementOptions, Node};
