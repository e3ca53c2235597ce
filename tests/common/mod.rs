//! Common test utilities and helpers.

use axum_test::TestServer;
use lostfound::config::StorageConfig;
use lostfound::{api, AppState};
use tempfile::TempDir;

/// A running test board backed by a temporary directory.
#[allow(dead_code)]
pub struct TestBoard {
    pub server: TestServer,
    pub state: AppState,
    pub storage: StorageConfig,
    // Held so the directory outlives the server.
    pub dir: TempDir,
}

/// Storage config pointing into `dir`.
pub fn storage_in(dir: &TempDir) -> StorageConfig {
    StorageConfig {
        data_file: dir.path().join("items.json"),
        upload_dir: dir.path().join("static").join("uploads"),
        max_upload_size: 1024 * 1024,
    }
}

/// Start a board over an existing directory.
pub async fn board_in(dir: TempDir) -> TestBoard {
    let storage = storage_in(&dir);
    let state = AppState::new(&storage)
        .await
        .expect("Failed to create app state");
    let app = api::app(state.clone(), storage.max_upload_size);
    let server = TestServer::new(app).expect("Failed to create test server");

    TestBoard {
        server,
        state,
        storage,
        dir,
    }
}

/// Start a board over a fresh, empty directory.
pub async fn board() -> TestBoard {
    board_in(TempDir::new().expect("Failed to create temp dir")).await
}
