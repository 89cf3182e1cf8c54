//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p filedrop-api`.

pub mod fixtures;

use axum_test::TestServer;
use filedrop_api::constants;
use filedrop_api::setup::routes;
use filedrop_api::state::AppState;
use filedrop_core::{Config, FileServiceConfig};
use filedrop_processing::UploadPolicy;
use filedrop_storage::{FileStore, LocalFileStore};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus the temporary storage root it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub storage_base_path: String,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Absolute path of `sub_path/name` under the storage root.
    pub fn stored_file(&self, sub_path: &str, name: &str) -> PathBuf {
        PathBuf::from(&self.storage_base_path)
            .join(sub_path)
            .join(name)
    }
}

/// Setup test app backed by local storage in a fresh temp directory.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage_base_path = temp_dir
        .path()
        .to_str()
        .expect("temp dir path is not UTF-8")
        .to_string();

    let config = Config(Box::new(FileServiceConfig::with_storage_base_path(
        &storage_base_path,
    )));

    let store: Arc<dyn FileStore> = Arc::new(
        LocalFileStore::new(config.storage_base_path())
            .await
            .expect("Failed to create local store"),
    );
    let policy = UploadPolicy::new(config.extension_rules(), store);
    let names = config.stored_name_generator();
    let state = Arc::new(AppState::new(config.clone(), policy, names));

    let router = routes::setup_routes(&config, state)
        .await
        .expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        storage_base_path: config.storage_base_path().to_string(),
        _temp_dir: temp_dir,
    }
}

/// `error` field of an error body.
pub fn error_message(body: &Value) -> &str {
    body.get("error").and_then(Value::as_str).unwrap_or_default()
}
