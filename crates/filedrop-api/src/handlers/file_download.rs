use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Response, StatusCode},
};
use filedrop_core::paths::join_storage_directory;
use filedrop_core::{to_base_path, AppError, FileDescriptor};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

/// Characters left as-is in the Content-Disposition filename.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DownloadQuery {
    /// Directory returned as `serverPath` by the upload
    server_path: Option<String>,
    /// Sub path the file was uploaded under
    sub_path: Option<String>,
    /// Name on disk, returned as `serverFilename` by the upload
    server_filename: Option<String>,
    /// Name offered to the client
    filename: Option<String>,
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput(format!("{} is required", field)))
}

/// `attachment; filename=<percent-encoded name>`
pub fn content_disposition(logical_name: &str) -> String {
    format!(
        "attachment; filename={}",
        utf8_percent_encode(logical_name, FILENAME_ENCODE_SET)
    )
}

#[utoipa::path(
    get,
    path = "/api/v0/files/download",
    tag = "files",
    params(DownloadQuery),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 400, description = "Missing parameter or path mismatch", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "download_file"))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response<Body>, HttpAppError> {
    let server_path = required(query.server_path, "serverPath")?;
    let sub_path = required(query.sub_path, "subPath")?;
    let server_filename = required(query.server_filename, "serverFilename")?;
    let filename = required(query.filename, "filename")?;

    let expected = join_storage_directory(state.storage_base_path(), &sub_path);
    if to_base_path(&server_path) != expected {
        return Err(AppError::InvalidInput(
            "serverPath does not match the storage location of subPath".to_string(),
        )
        .into());
    }

    let descriptor = FileDescriptor::for_download(
        &filename,
        state.storage_base_path(),
        &sub_path,
        &server_filename,
    );

    let file = state.policy.resolve_for_download(&descriptor).await?;

    tracing::debug!(
        stored_name = %descriptor.stored_name(),
        size_bytes = file.content_length(),
        content_type = file.content_type,
        "Serving file"
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&file.logical_name),
        )
        .header(header::CONTENT_LENGTH, file.content_length())
        .header("Content-Transfer-Encoding", "binary")
        .body(Body::from(file.data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
