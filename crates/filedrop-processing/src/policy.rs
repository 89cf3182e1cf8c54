//! Upload policy: validate → ensure directory → write.
//!
//! Every upload goes through [`UploadPolicy::accept`], which runs the
//! [`UploadValidator`] checks in order and only then touches the store. A
//! rejected descriptor never creates a directory.

use std::path::Path;
use std::sync::Arc;

use filedrop_core::{AppError, ExtensionRules, FileDescriptor, Payload};
use filedrop_storage::{FileStore, StorageError};

use crate::codec::decode_base64;
use crate::validator::{UploadValidator, ValidationError};

/// Failures of a single upload or download
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("base64String is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Validation(e) => e.into(),
            UploadError::Storage(e) => e.into(),
            UploadError::InvalidBase64(e) => {
                AppError::InvalidInput(format!("base64String is not valid base64: {}", e))
            }
        }
    }
}

/// One descriptor to accept, with its image-only flag.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub descriptor: FileDescriptor,
    pub image_only: bool,
}

/// File content resolved for download.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub logical_name: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

impl DownloadedFile {
    pub fn content_length(&self) -> usize {
        self.data.len()
    }
}

/// Extension rules plus the store they guard.
#[derive(Clone)]
pub struct UploadPolicy {
    validator: UploadValidator,
    store: Arc<dyn FileStore>,
}

impl UploadPolicy {
    pub fn new(rules: ExtensionRules, store: Arc<dyn FileStore>) -> Self {
        Self {
            validator: UploadValidator::new(rules),
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn FileStore> {
        &self.store
    }

    pub fn is_denied_extension(&self, descriptor: &FileDescriptor) -> bool {
        self.validator.is_denied_extension(descriptor)
    }

    pub fn is_image_extension(&self, descriptor: &FileDescriptor) -> bool {
        self.validator.is_image_extension(descriptor)
    }

    pub fn resolve_content_type(&self, descriptor: &FileDescriptor) -> &'static str {
        descriptor.content_type()
    }

    pub async fn ensure_storage_directory(
        &self,
        descriptor: &FileDescriptor,
    ) -> Result<(), UploadError> {
        self.store
            .create_dir_all(Path::new(descriptor.storage_directory()))
            .await?;
        Ok(())
    }

    /// Write raw bytes to `storage_directory/stored_name`, replacing any existing file.
    ///
    /// With `keep_original_name`, concurrent uploads of the same name race and
    /// the last writer wins.
    pub async fn commit_from_bytes(
        &self,
        descriptor: FileDescriptor,
        data: &[u8],
    ) -> Result<FileDescriptor, UploadError> {
        self.ensure_storage_directory(&descriptor).await?;
        let size = self.store.write(&descriptor.stored_path(), data).await?;
        Ok(descriptor.with_size(size))
    }

    /// Decode the base64 payload and write it; the size is read back from disk.
    ///
    /// The payload is decoded before the directory is created, so undecodable
    /// input leaves no trace on disk.
    pub async fn commit_from_base64(
        &self,
        descriptor: FileDescriptor,
    ) -> Result<FileDescriptor, UploadError> {
        let data = match descriptor.payload() {
            Payload::Base64(text) => decode_base64(text)?,
            _ => return Err(ValidationError::MissingContent.into()),
        };
        self.commit_from_bytes(descriptor, &data).await
    }

    async fn commit(&self, descriptor: FileDescriptor) -> Result<FileDescriptor, UploadError> {
        match descriptor.payload() {
            Payload::Bytes(bytes) => {
                let bytes = bytes.clone();
                self.commit_from_bytes(descriptor, &bytes).await
            }
            Payload::Base64(_) => self.commit_from_base64(descriptor).await,
            Payload::Empty => Err(ValidationError::MissingContent.into()),
        }
    }

    /// Validate one descriptor and commit its payload.
    #[tracing::instrument(
        skip(self, descriptor),
        fields(
            filename = %descriptor.logical_name(),
            sub_path = %descriptor.sub_path(),
            stored_name = %descriptor.stored_name()
        )
    )]
    pub async fn accept(
        &self,
        descriptor: FileDescriptor,
        image_only: bool,
    ) -> Result<FileDescriptor, UploadError> {
        if let Err(e) = self.validator.validate_all(&descriptor, image_only) {
            tracing::warn!(error = %e, "Upload rejected");
            return Err(e.into());
        }

        let committed = self.commit(descriptor).await?;
        tracing::info!(
            storage_directory = %committed.storage_directory(),
            size_bytes = committed.size_bytes(),
            "Upload stored"
        );
        Ok(committed)
    }

    /// Accept each request in order, stopping at the first failure.
    ///
    /// The error carries the 1-based index of the failing request. Files
    /// written before it stay on disk.
    pub async fn accept_batch(
        &self,
        requests: Vec<UploadRequest>,
    ) -> Result<Vec<FileDescriptor>, AppError> {
        if requests.is_empty() {
            return Err(AppError::InvalidInput("No files to upload".to_string()));
        }

        let mut accepted = Vec::with_capacity(requests.len());
        for (position, request) in requests.into_iter().enumerate() {
            let descriptor = self
                .accept(request.descriptor, request.image_only)
                .await
                .map_err(|e| AppError::from(e).at_index(position + 1))?;
            accepted.push(descriptor);
        }
        Ok(accepted)
    }

    /// Read the file a descriptor points at.
    #[tracing::instrument(
        skip(self, descriptor),
        fields(sub_path = %descriptor.sub_path(), stored_name = %descriptor.stored_name())
    )]
    pub async fn resolve_for_download(
        &self,
        descriptor: &FileDescriptor,
    ) -> Result<DownloadedFile, UploadError> {
        self.validator.validate_download(descriptor)?;

        let data = self.store.read(&descriptor.stored_path()).await?;
        Ok(DownloadedFile {
            logical_name: descriptor.logical_name().to_string(),
            content_type: self.resolve_content_type(descriptor),
            data,
        })
    }
}
