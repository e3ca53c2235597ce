//! Service layer for the lost and found board.
//!
//! - ItemStore (JSON file-backed item collection)
//! - UploadStorage (sanitized photo uploads)

pub mod item_store;
pub mod upload_storage;

pub use item_store::ItemStore;
pub use upload_storage::{sanitize_filename, UploadStorage};
