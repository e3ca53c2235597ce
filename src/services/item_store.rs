//! JSON file-backed item store.
//!
//! The whole collection lives in memory for the life of the process and is
//! rewritten to a single pretty-printed JSON array on every append. Records
//! are kept in creation order (oldest first).
//!
//! Load failures never reach callers: a missing file is an empty board, and
//! an unreadable or malformed file is logged and also treated as empty.
//! Records that do not fit the item schema are skipped one by one. Whenever
//! a file could not be loaded in full, a copy is kept next to it before the
//! next save overwrites it.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::Item;
use crate::{Error, Result};

/// Records read from the data file.
#[derive(Debug, Default)]
pub struct Loaded {
    pub items: Vec<Item>,
    /// Number of array entries that were not valid item records.
    pub skipped: usize,
}

/// Read the data file record by record.
///
/// A missing file yields an empty collection. The file must hold a JSON
/// array; entries that are not valid items are logged and skipped.
pub async fn read_records(path: &Path) -> Result<Loaded> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Loaded::default()),
        Err(e) => {
            return Err(Error::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    let records: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
        Error::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    let mut loaded = Loaded::default();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Item>(record) {
            Ok(item) => loaded.items.push(item),
            Err(e) => {
                warn!("Skipping record {} in {}: {}", index, path.display(), e);
                loaded.skipped += 1;
            }
        }
    }

    Ok(loaded)
}

/// Read the data file, reporting why a load failed.
///
/// A missing file is not an error and yields an empty collection.
pub async fn try_load(path: &Path) -> Result<Vec<Item>> {
    read_records(path).await.map(|loaded| loaded.items)
}

/// Path the data file is copied to when it cannot be loaded in full.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".corrupt");
    PathBuf::from(name)
}

async fn keep_backup(path: &Path) {
    let backup = backup_path(path);
    match fs::copy(path, &backup).await {
        Ok(_) => warn!("Kept a copy of {} at {}", path.display(), backup.display()),
        Err(e) => warn!("Failed to copy {} aside: {}", path.display(), e),
    }
}

/// Read the data file, falling back to an empty collection on any failure.
pub async fn load(path: &Path) -> Vec<Item> {
    match try_load(path).await {
        Ok(items) => items,
        Err(e) => {
            warn!("Starting with an empty item list: {}", e);
            Vec::new()
        }
    }
}

/// Overwrite the data file with the full collection.
///
/// Writes to a sibling temp file first, then renames it over the data file.
pub async fn save(path: &Path, items: &[Item]) -> Result<()> {
    let content = to_pretty_json(items)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Storage(format!("Failed to create data directory: {}", e)))?;
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)
        .await
        .map_err(|e| Error::Storage(format!("Failed to write data file: {}", e)))?;
    fs::rename(&temp_path, path)
        .await
        .map_err(|e| Error::Storage(format!("Failed to rename data file: {}", e)))?;

    Ok(())
}

// Four-space indentation, matching files written by earlier deployments.
fn to_pretty_json(items: &[Item]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    items.serialize(&mut serializer)?;
    Ok(buf)
}

/// In-memory item collection persisted to a JSON file.
///
/// Appends are serialized through a single lock held across the file write,
/// so two submissions in the same process never overwrite each other.
pub struct ItemStore {
    path: PathBuf,
    items: Mutex<Vec<Item>>,
}

impl ItemStore {
    /// Load the store from `path`, starting empty if it cannot be read.
    ///
    /// A file that was only partly usable is copied to [`backup_path`] first.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match read_records(&path).await {
            Ok(loaded) => {
                if loaded.skipped > 0 {
                    keep_backup(&path).await;
                }
                loaded.items
            }
            Err(e) => {
                warn!("Starting with an empty item list: {}", e);
                if path.is_file() {
                    keep_backup(&path).await;
                }
                Vec::new()
            }
        };
        info!("Loaded {} items from {}", items.len(), path.display());

        Self {
            path,
            items: Mutex::new(items),
        }
    }

    /// Append a record and persist the whole collection.
    ///
    /// If the write fails the record is dropped from memory as well.
    pub async fn append(&self, item: Item) -> Result<()> {
        let mut items = self.items.lock().await;
        items.push(item);

        if let Err(e) = save(&self.path, &items).await {
            items.pop();
            return Err(e);
        }

        debug!("Persisted {} items to {}", items.len(), self.path.display());
        Ok(())
    }

    /// All records, oldest first.
    pub async fn all(&self) -> Vec<Item> {
        self.items.lock().await.clone()
    }

    /// All records, newest first.
    pub async fn newest_first(&self) -> Vec<Item> {
        let items = self.items.lock().await;
        items.iter().rev().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}
