use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use filedrop_core::{Base64UploadItem, DescriptorResponse};
use filedrop_processing::UploadRequest;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v0/files/base64",
    tag = "files",
    request_body = Vec<Base64UploadItem>,
    responses(
        (status = 200, description = "Files stored, in request order", body = Vec<DescriptorResponse>),
        (status = 400, description = "Missing field, bad base64 or unsafe path; message carries the item index", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 422, description = "Extension not allowed; message carries the item index", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, items), fields(item_count = items.len()))]
pub async fn upload_base64_files(
    State(state): State<Arc<AppState>>,
    ValidatedJson(items): ValidatedJson<Vec<Base64UploadItem>>,
) -> Result<Json<Vec<DescriptorResponse>>, HttpAppError> {
    let requests = items
        .into_iter()
        .map(|item| {
            let image_only = item.is_image;
            UploadRequest {
                descriptor: item.into_descriptor(state.storage_base_path(), &state.names),
                image_only,
            }
        })
        .collect();

    let stored = state.policy.accept_batch(requests).await?;

    Ok(Json(stored.iter().map(DescriptorResponse::from).collect()))
}
