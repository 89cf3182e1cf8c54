//! Domain route groups.

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn file_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/files", API_PREFIX),
            post(handlers::file_upload::upload_files),
        )
        .route(
            &format!("{}/files/base64", API_PREFIX),
            post(handlers::base64_upload::upload_base64_files),
        )
        .route(
            &format!("{}/files/download", API_PREFIX),
            get(handlers::file_download::download_file),
        )
        .with_state(state)
}
