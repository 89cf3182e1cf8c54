use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::descriptor::{FileDescriptor, Payload};
use crate::naming::StoredNameGenerator;

/// One element of a base64 JSON upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Base64UploadItem {
    /// Logical file name, e.g. `report.pdf`
    #[serde(default)]
    pub filename: Option<String>,
    /// File content, standard base64
    #[serde(default)]
    pub base64_string: Option<String>,
    /// Directory under the storage root, e.g. `notice/10001`
    #[serde(default)]
    pub sub_path: Option<String>,
    /// Store under the logical name instead of a generated one
    #[serde(default)]
    pub keep_original_filename: bool,
    /// Only accept image extensions
    #[serde(default)]
    pub is_image: bool,
}

impl Base64UploadItem {
    /// Build the descriptor once every input is known.
    ///
    /// The size is unknown until the decoded bytes are written and read back.
    pub fn into_descriptor(
        self,
        storage_base_path: &str,
        names: &StoredNameGenerator,
    ) -> FileDescriptor {
        let payload = self.base64_string.map_or(Payload::Empty, Payload::Base64);
        FileDescriptor::from_upload(
            self.filename.as_deref(),
            0,
            payload,
            storage_base_path,
            self.sub_path.as_deref().unwrap_or_default(),
            self.keep_original_filename,
            names,
        )
    }
}

/// Descriptor as echoed back to clients after a successful upload.
///
/// The payload itself is never echoed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorResponse {
    pub filename: String,
    pub extension: Option<String>,
    pub size: u64,
    /// Directory the file was written to
    pub server_path: String,
    pub sub_path: String,
    /// Name of the file on disk
    pub server_filename: String,
    pub keep_original_filename: bool,
}

impl From<&FileDescriptor> for DescriptorResponse {
    fn from(descriptor: &FileDescriptor) -> Self {
        Self {
            filename: descriptor.logical_name().to_string(),
            extension: descriptor.extension().map(str::to_string),
            size: descriptor.size_bytes(),
            server_path: descriptor.storage_directory().to_string(),
            sub_path: descriptor.sub_path().to_string(),
            server_filename: descriptor.stored_name().to_string(),
            keep_original_filename: descriptor.keep_original_name(),
        }
    }
}
