//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded [`Config`] to a ready router.

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use filedrop_core::Config;
use filedrop_processing::UploadPolicy;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let store = filedrop_storage::create_store(&config)
        .await
        .context("Failed to initialize file store")?;

    let policy = UploadPolicy::new(config.extension_rules(), store);
    let names = config.stored_name_generator();
    let state = Arc::new(AppState::new(config.clone(), policy, names));

    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
