use std::path::Path;

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use super::{FeedSink, RenderedFeed};
use crate::error::{FeedError, Result};

/// Turns a rendered feed into an HTTP response.
///
/// The body is the XML as-is and `Content-Type` carries the feed's encoding.
/// With a file name attached, `Content-Disposition: inline; filename="..."`
/// is added as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpSink {
    filename: Option<String>,
}

impl HttpSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a file name for the `Content-Disposition` header.
    #[must_use]
    pub fn with_filename(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
        }
    }

    /// Use the base name of `path` as the file name.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        Self {
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
        }
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| FeedError::InvalidArgument(format!("invalid header value '{value}': {e}")))
}

impl FeedSink for HttpSink {
    type Output = Response;

    fn accept(&self, feed: &RenderedFeed) -> Result<Response> {
        let content_type = header_value(&feed.content_type())?;
        let disposition = match &self.filename {
            Some(name) if name.contains('"') => {
                return Err(FeedError::InvalidArgument(format!(
                    "file name must not contain quotes: {name}"
                )))
            }
            Some(name) => Some(header_value(&format!("inline; filename=\"{name}\""))?),
            None => None,
        };

        let mut response = Response::new(Body::from(feed.as_bytes().to_vec()));
        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, content_type);
        if let Some(disposition) = disposition {
            headers.insert(CONTENT_DISPOSITION, disposition);
        }
        Ok(response)
    }
}

impl IntoResponse for RenderedFeed {
    fn into_response(self) -> Response {
        match HttpSink::new().accept(&self) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build feed response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
