//! Storage abstraction trait
//!
//! This module defines the FileStore trait that the upload policy writes
//! through and reads back from.

use async_trait::async_trait;
use filedrop_core::AppError;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Directory creation failed: {0}")]
    CreateDirFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(path) => AppError::NotFound(format!("File not found: {}", path)),
            StorageError::InvalidPath(msg) => AppError::InvalidInput(msg),
            other => AppError::StorageFailure(other.to_string()),
        }
    }
}

/// Filesystem abstraction
///
/// Paths are full paths (directory plus file name). Implementations must
/// refuse paths that escape their root with `StorageError::InvalidPath`.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Create a directory and all missing parents.
    ///
    /// An existing directory, including one created concurrently, is success.
    async fn create_dir_all(&self, directory: &Path) -> StorageResult<()>;

    /// Write `data` to `path`, replacing any existing file.
    ///
    /// Returns the size of the written file as read back from the filesystem.
    async fn write(&self, path: &Path, data: &[u8]) -> StorageResult<u64>;

    /// Read a whole file.
    ///
    /// Returns `StorageError::NotFound` if no regular file exists at `path`.
    async fn read(&self, path: &Path) -> StorageResult<Vec<u8>>;

    /// Check that the store's root is reachable (readiness probe).
    async fn health_check(&self) -> StorageResult<()>;
}
