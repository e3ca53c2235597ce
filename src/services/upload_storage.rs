//! Upload storage for item photos.
//!
//! Files are stored flat under the upload directory, named by their
//! sanitized original filename. A later upload with the same name replaces
//! the earlier file.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use crate::{Error, Result};

/// Reduce a client-supplied filename to a safe basename.
///
/// Keeps only the final path component (either separator style), turns
/// whitespace runs into `_`, drops everything outside `[A-Za-z0-9._-]`, and
/// trims leading/trailing `.` and `_`. Returns `None` if nothing is left.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let basename = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    let joined = basename.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Writes uploaded files into a single directory.
pub struct UploadStorage {
    dir: PathBuf,
}

impl UploadStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory uploads are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Error::Upload(format!("Failed to create upload directory: {}", e)))
    }

    /// Store an upload and return the filename it was saved under.
    ///
    /// Returns `Ok(None)` without touching the disk when the filename
    /// sanitizes to nothing.
    pub async fn save(&self, raw_filename: &str, data: &[u8]) -> Result<Option<String>> {
        let Some(filename) = sanitize_filename(raw_filename) else {
            return Ok(None);
        };

        let path = self.dir.join(&filename);
        fs::write(&path, data)
            .await
            .map_err(|e| Error::Upload(format!("Failed to write {}: {}", path.display(), e)))?;

        info!(
            original = raw_filename,
            stored = %filename,
            size = data.len(),
            "Saved upload"
        );

        Ok(Some(filename))
    }
}
