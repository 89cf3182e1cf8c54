//! Application state shared by all handlers.

use filedrop_core::{Config, StoredNameGenerator};
use filedrop_processing::UploadPolicy;

/// Read-only configuration plus the policy guarding the file store.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub policy: UploadPolicy,
    pub names: StoredNameGenerator,
}

impl AppState {
    pub fn new(config: Config, policy: UploadPolicy, names: StoredNameGenerator) -> Self {
        Self {
            config,
            policy,
            names,
        }
    }

    /// Configured storage root every upload is written under.
    pub fn storage_base_path(&self) -> &str {
        self.config.storage_base_path()
    }
}
