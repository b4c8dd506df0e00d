use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{FeedSink, RenderedFeed};
use crate::error::{FeedError, Result};

/// Writes feeds to a file.
///
/// The bytes go to a hidden temp file next to the target, are synced to disk
/// and then renamed over the target, so readers never see a partial feed.
/// The parent directory must already exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, bytes: &[u8]) -> io::Result<()> {
        let file_name = self.path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")
        })?;
        let temp_file = self
            .path
            .with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        if let Err(e) = write_synced(&temp_file, bytes) {
            let _ = fs::remove_file(&temp_file);
            return Err(e);
        }

        // On Windows, rename fails if the destination already exists
        #[cfg(target_os = "windows")]
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }

        fs::rename(&temp_file, &self.path).inspect_err(|_| {
            let _ = fs::remove_file(&temp_file);
        })
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl FeedSink for FileSink {
    type Output = PathBuf;

    fn accept(&self, feed: &RenderedFeed) -> Result<PathBuf> {
        self.write_atomic(feed.as_bytes())
            .map_err(|source| FeedError::FilesystemWrite {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!(
            path = %self.path.display(),
            bytes = feed.as_bytes().len(),
            "Saved feed"
        );
        Ok(self.path.clone())
    }
}
