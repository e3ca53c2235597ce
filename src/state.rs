//! Application state for the lost and found board.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::services::{ItemStore, UploadStorage};
use crate::views::Views;
use crate::Result;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Item records, persisted to the data file.
    pub items: Arc<ItemStore>,
    /// Photo upload storage.
    pub uploads: Arc<UploadStorage>,
    /// Page templates.
    pub views: Arc<Views>,
}

impl AppState {
    /// Create the application state: load the item store and make sure the
    /// upload directory exists.
    pub async fn new(storage: &StorageConfig) -> Result<Self> {
        let uploads = UploadStorage::new(&storage.upload_dir);
        uploads.ensure_dir().await?;

        let items = ItemStore::open(&storage.data_file).await;
        let views = Views::new()?;

        Ok(Self {
            items: Arc::new(items),
            uploads: Arc::new(uploads),
            views: Arc::new(views),
        })
    }
}
