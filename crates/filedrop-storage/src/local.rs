use crate::traits::{FileStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a new LocalFileStore instance
    ///
    /// # Arguments
    /// * `root` - Root directory for uploads (e.g., "/data/uploads"); created if missing
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(LocalFileStore { root })
    }

    /// Reject paths that are not lexically under the root.
    ///
    /// No canonicalization: the directory may not exist yet when this runs.
    fn check_path(&self, path: &Path) -> StorageResult<()> {
        if path
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return Err(StorageError::InvalidPath(
                "Path contains a parent directory segment".to_string(),
            ));
        }

        if !path.starts_with(&self.root) {
            return Err(StorageError::InvalidPath(
                "Path resolves outside storage directory".to_string(),
            ));
        }

        Ok(())
    }
}

fn read_error(path: &Path, e: std::io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
        _ => StorageError::ReadFailed(format!(
            "Failed to read file {}: {}",
            path.display(),
            e
        )),
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn create_dir_all(&self, directory: &Path) -> StorageResult<()> {
        self.check_path(directory)?;

        match fs::create_dir_all(directory).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists && directory.is_dir() => {}
            Err(e) => {
                return Err(StorageError::CreateDirFailed(format!(
                    "Failed to create directory {}: {}",
                    directory.display(),
                    e
                )))
            }
        }

        tracing::debug!(directory = %directory.display(), "Storage directory ready");
        Ok(())
    }

    async fn write(&self, path: &Path, data: &[u8]) -> StorageResult<u64> {
        self.check_path(path)?;
        let start = std::time::Instant::now();

        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let size = fs::metadata(path)
            .await
            .map_err(|e| {
                StorageError::ReadFailed(format!(
                    "Failed to read back size of {}: {}",
                    path.display(),
                    e
                ))
            })?
            .len();

        tracing::info!(
            path = %path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(size)
    }

    async fn read(&self, path: &Path) -> StorageResult<Vec<u8>> {
        self.check_path(path)?;
        let start = std::time::Instant::now();

        let metadata = fs::metadata(path)
            .await
            .map_err(|e| read_error(path, e))?;
        if !metadata.is_file() {
            return Err(StorageError::NotFound(path.display().to_string()));
        }

        let data = fs::read(path).await.map_err(|e| read_error(path, e))?;

        tracing::info!(
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage read successful"
        );

        Ok(data)
    }

    async fn health_check(&self) -> StorageResult<()> {
        let metadata = fs::metadata(&self.root).await?;
        if !metadata.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "Storage root {} is not a directory",
                self.root.display()
            )));
        }
        Ok(())
    }
}
