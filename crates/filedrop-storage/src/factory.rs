use crate::{FileStore, LocalFileStore, StorageError, StorageResult};
use filedrop_core::Config;
use std::sync::Arc;

/// Create the file store rooted at the configured base path
pub async fn create_store(config: &Config) -> StorageResult<Arc<dyn FileStore>> {
    let root = config.storage_base_path();
    if root.trim().is_empty() {
        return Err(StorageError::ConfigError(
            "STORAGE_BASE_PATH not configured".to_string(),
        ));
    }

    let store = LocalFileStore::new(root).await?;
    tracing::info!(root = %root, "Local file store initialized");
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedrop_core::FileServiceConfig;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_store_makes_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("uploads");
        let config = Config(Box::new(FileServiceConfig::with_storage_base_path(
            root.to_string_lossy(),
        )));

        let store = create_store(&config).await.unwrap();
        assert!(root.is_dir());
        store.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn test_create_store_requires_base_path() {
        let config = Config(Box::new(FileServiceConfig::with_storage_base_path("")));
        assert!(matches!(
            create_store(&config).await,
            Err(StorageError::ConfigError(_))
        ));
    }
}
