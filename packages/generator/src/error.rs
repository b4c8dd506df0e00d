//! Error types for the feed generator.
//!
//! A single `FeedError` covers node construction, filter compilation,
//! rendering and the output sinks so library consumers can match on one type.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the generator library.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A constructor received an argument of the wrong shape.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A filter pattern is not a valid regular expression.
    #[error("Invalid filter pattern '{pattern}': {source}")]
    InvalidFilterPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An element or attribute name is not a valid XML name.
    #[error("Invalid XML name: '{name}'")]
    InvalidName { name: String },

    /// Text contains characters that XML 1.0 does not allow.
    #[error("Character not allowed in XML 1.0 in {context}")]
    InvalidCharacter { context: String },

    /// Writing the XML tree failed.
    #[error("XML serialization failed: {0}")]
    Serialization(String),

    /// Only UTF-8 output is produced.
    #[error("Unsupported encoding: '{0}'. Only UTF-8 output is supported")]
    UnsupportedEncoding(String),

    /// Writing the rendered feed to disk failed.
    #[error("Failed to write feed to {}: {source}", .path.display())]
    FilesystemWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parsing rendered XML failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Rendered XML does not have the `rss > channel` shape.
    #[error("Unexpected feed structure: {0}")]
    Structure(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML configuration or manifest could not be read.
    #[error("YAML parsing failed: {0}")]
    Config(#[from] serde_yaml_ng::Error),
}

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, FeedError>;
