//! OpenAPI documentation.
//! Routes are versioned under `crate::constants::API_PREFIX`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use filedrop_core::models;

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Filedrop API",
        version = "0.1.0",
        description = "File upload and download service (v0). Files arrive as multipart parts or base64 JSON, are checked against an extension deny-list and an optional image-only rule, and are stored under the configured root. All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::file_upload::upload_files,
        handlers::base64_upload::upload_base64_files,
        handlers::file_download::download_file,
    ),
    components(schemas(
        models::Base64UploadItem,
        models::DescriptorResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "files", description = "File upload and download")
    )
)]
pub struct ApiDoc;
