//! Common utilities for file upload handlers

use axum::extract::Multipart;
use bytes::Bytes;
use filedrop_core::AppError;

use crate::error::HttpAppError;

/// One `file` part read from a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedPart {
    pub filename: Option<String>,
    pub data: Bytes,
}

/// Everything a multipart upload request carries.
#[derive(Debug, Default)]
pub struct MultipartUpload {
    pub files: Vec<UploadedPart>,
    pub sub_path: Option<String>,
    pub keep_original_filename: bool,
    pub is_image: bool,
}

/// Parse a form boolean: `true/false`, `1/0`, `yes/no`, `on/off` (case-insensitive).
/// An empty value is false.
pub fn parse_form_bool(field: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::InvalidInput(format!(
            "{} must be a boolean, got '{}'",
            field, other
        ))),
    }
}

/// Read every field of an upload form.
///
/// Fields may arrive in any order; parts named `file` are kept in the order
/// they were sent. Unknown fields are skipped.
pub async fn extract_multipart_upload(
    mut multipart: Multipart,
) -> Result<MultipartUpload, HttpAppError> {
    let mut upload = MultipartUpload::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                let filename = field
                    .file_name()
                    .map(|s: &str| s.to_string())
                    .filter(|s| !s.is_empty());
                let data = field.bytes().await?;
                upload.files.push(UploadedPart { filename, data });
            }
            "subPath" => {
                upload.sub_path = Some(field.text().await?);
            }
            "keepOriginalFilename" => {
                let value = field.text().await?;
                upload.keep_original_filename = parse_form_bool(&field_name, &value)?;
            }
            "isImage" => {
                let value = field.text().await?;
                upload.is_image = parse_form_bool(&field_name, &value)?;
            }
            _ => {
                tracing::debug!(field = %field_name, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(upload)
}
