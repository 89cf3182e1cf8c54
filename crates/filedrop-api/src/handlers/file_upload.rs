use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_upload;
use axum::{
    extract::{Multipart, State},
    Json,
};
use filedrop_core::{AppError, DescriptorResponse, FileDescriptor, Payload};
use filedrop_processing::UploadRequest;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v0/files",
    tag = "files",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "One or more `file` parts plus `subPath` (required), `keepOriginalFilename` and `isImage` (optional booleans)"
    ),
    responses(
        (status = 200, description = "Files stored, in request order", body = Vec<DescriptorResponse>),
        (status = 400, description = "Missing field or unsafe path", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 422, description = "Extension not allowed", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<Vec<DescriptorResponse>>, HttpAppError> {
    let upload = extract_multipart_upload(multipart).await?;

    if upload.files.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()).into());
    }

    let sub_path = upload.sub_path.unwrap_or_default();
    if sub_path.trim().is_empty() {
        return Err(AppError::InvalidInput("subPath is required".to_string()).into());
    }

    tracing::debug!(
        file_count = upload.files.len(),
        sub_path = %sub_path,
        keep_original_filename = upload.keep_original_filename,
        is_image = upload.is_image,
        "Multipart upload received"
    );

    let requests = upload
        .files
        .into_iter()
        .map(|part| UploadRequest {
            descriptor: FileDescriptor::from_upload(
                part.filename.as_deref(),
                part.data.len() as u64,
                Payload::Bytes(part.data),
                state.storage_base_path(),
                &sub_path,
                upload.keep_original_filename,
                &state.names,
            ),
            image_only: upload.is_image,
        })
        .collect();

    let stored = state.policy.accept_batch(requests).await?;

    Ok(Json(stored.iter().map(DescriptorResponse::from).collect()))
}
