//! Configuration module
//!
//! This module provides configuration structures for the file service: server
//! settings shared by any binary, plus storage location, upload limits,
//! extension rules and stored-name generation.

use std::env;
use std::sync::Arc;

use crate::naming::{
    StoredNameGenerator, SystemEntropy, DEFAULT_STORED_NAME_PREFIX, DEFAULT_TOKEN_LENGTH,
};
use crate::paths::to_base_path;
use crate::validation::{ExtensionRules, DEFAULT_DENIED_EXTENSIONS, DEFAULT_IMAGE_EXTENSIONS};

// Common constants
const DEFAULT_PORT: u16 = 4000;
const MAX_UPLOAD_SIZE_MB: usize = 50;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Base configuration shared by every binary
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
}

impl BaseConfig {
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }
}

/// File service configuration
#[derive(Clone, Debug)]
pub struct FileServiceConfig {
    pub base: BaseConfig,
    /// Server root for all uploads; never taken from the request
    pub storage_base_path: String,
    pub max_upload_size_mb: usize,
    pub denied_extensions: Vec<String>,
    pub image_extensions: Vec<String>,
    pub stored_name_prefix: String,
    pub stored_name_token_length: usize,
}

/// Application configuration (file service).
#[derive(Clone, Debug)]
pub struct Config(pub Box<FileServiceConfig>);

impl Config {
    fn as_service(&self) -> &FileServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.as_service().base.is_production()
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = FileServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_service().base.cors_origins
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_service().base.http_concurrency_limit
    }

    pub fn storage_base_path(&self) -> &str {
        &self.as_service().storage_base_path
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_service().max_upload_size_mb * 1024 * 1024
    }

    /// Deny-list and image set built from the configured extension lists.
    pub fn extension_rules(&self) -> ExtensionRules {
        let service = self.as_service();
        ExtensionRules::new(&service.denied_extensions, &service.image_extensions)
    }

    /// Generator for stored names, backed by the system RNG and clock.
    pub fn stored_name_generator(&self) -> StoredNameGenerator {
        let service = self.as_service();
        StoredNameGenerator::new(
            service.stored_name_prefix.clone(),
            service.stored_name_token_length,
            Arc::new(SystemEntropy),
        )
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn defaults(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl FileServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            http_concurrency_limit: lookup("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
        };

        let storage_base_path = lookup("STORAGE_BASE_PATH")
            .map(|path| to_base_path(&path))
            .ok_or_else(|| anyhow::anyhow!("STORAGE_BASE_PATH must be set"))?;

        let max_upload_size_mb = lookup("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))?;

        let denied_extensions = lookup("DENIED_EXTENSIONS")
            .map(|raw| split_list(&raw))
            .unwrap_or_else(|| defaults(DEFAULT_DENIED_EXTENSIONS));

        let image_extensions = lookup("IMAGE_EXTENSIONS")
            .map(|raw| split_list(&raw))
            .unwrap_or_else(|| defaults(DEFAULT_IMAGE_EXTENSIONS));

        let stored_name_token_length = lookup("STORED_NAME_TOKEN_LENGTH")
            .unwrap_or_else(|| DEFAULT_TOKEN_LENGTH.to_string())
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("STORED_NAME_TOKEN_LENGTH must be a valid number"))?;

        Ok(FileServiceConfig {
            base,
            storage_base_path,
            max_upload_size_mb,
            denied_extensions,
            image_extensions,
            stored_name_prefix: lookup("STORED_NAME_PREFIX")
                .unwrap_or_else(|| DEFAULT_STORED_NAME_PREFIX.to_string()),
            stored_name_token_length,
        })
    }

    /// Development defaults rooted at `storage_base_path`.
    pub fn with_storage_base_path(storage_base_path: impl AsRef<str>) -> Self {
        FileServiceConfig {
            base: BaseConfig {
                server_port: DEFAULT_PORT,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            },
            storage_base_path: to_base_path(storage_base_path.as_ref()),
            max_upload_size_mb: MAX_UPLOAD_SIZE_MB,
            denied_extensions: defaults(DEFAULT_DENIED_EXTENSIONS),
            image_extensions: defaults(DEFAULT_IMAGE_EXTENSIONS),
            stored_name_prefix: DEFAULT_STORED_NAME_PREFIX.to_string(),
            stored_name_token_length: DEFAULT_TOKEN_LENGTH,
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage_base_path.trim().is_empty() {
            return Err(anyhow::anyhow!("STORAGE_BASE_PATH must not be empty"));
        }

        if self.max_upload_size_mb == 0 {
            return Err(anyhow::anyhow!(
                "MAX_UPLOAD_SIZE_MB must be greater than zero"
            ));
        }

        if self.stored_name_token_length == 0 {
            return Err(anyhow::anyhow!(
                "STORED_NAME_TOKEN_LENGTH must be greater than zero"
            ));
        }

        if self.stored_name_prefix.contains(['/', '\\']) {
            return Err(anyhow::anyhow!(
                "STORED_NAME_PREFIX must not contain a path separator"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            FileServiceConfig::from_lookup(lookup_from(&[("STORAGE_BASE_PATH", "/data/uploads/")]))
                .unwrap();
        assert_eq!(config.base.server_port, 4000);
        assert_eq!(config.base.environment, "development");
        assert_eq!(config.base.http_concurrency_limit, 10_000);
        assert_eq!(config.storage_base_path, "/data/uploads");
        assert_eq!(config.max_upload_size_mb, 50);
        assert_eq!(config.stored_name_prefix, "FD-");
        assert_eq!(config.stored_name_token_length, 5);
        assert!(config.denied_extensions.contains(&"ry".to_string()));
        config.validate().unwrap();
    }

    #[test]
    fn test_base_path_is_required() {
        let err = FileServiceConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("STORAGE_BASE_PATH"));
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let result = FileServiceConfig::from_lookup(lookup_from(&[
            ("STORAGE_BASE_PATH", "/data"),
            ("ENVIRONMENT", "production"),
        ]));
        assert!(result.is_err());

        let config = FileServiceConfig::from_lookup(lookup_from(&[
            ("STORAGE_BASE_PATH", "/data"),
            ("APP_ENV", "prod"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ]))
        .unwrap();
        assert!(config.base.is_production());
        assert_eq!(config.base.cors_origins.len(), 2);
    }

    #[test]
    fn test_extension_overrides() {
        let config = Config(Box::new(
            FileServiceConfig::from_lookup(lookup_from(&[
                ("STORAGE_BASE_PATH", "/data"),
                ("DENIED_EXTENSIONS", "EXE, sh,,"),
                ("IMAGE_EXTENSIONS", "png,webp"),
            ]))
            .unwrap(),
        ));
        let rules = config.extension_rules();
        assert!(rules.is_denied(Some("exe")));
        assert!(!rules.is_denied(Some("php")));
        assert!(rules.is_image(Some("webp")));
        assert!(!rules.is_image(Some("gif")));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileServiceConfig::with_storage_base_path("/data");
        config.validate().unwrap();

        config.stored_name_prefix = "up/".to_string();
        assert!(config.validate().is_err());

        let mut config = FileServiceConfig::with_storage_base_path("/data");
        config.stored_name_token_length = 0;
        assert!(config.validate().is_err());

        let mut config = FileServiceConfig::with_storage_base_path("/data");
        config.max_upload_size_mb = 0;
        assert!(config.validate().is_err());

        let config = FileServiceConfig::with_storage_base_path("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_port() {
        let result = FileServiceConfig::from_lookup(lookup_from(&[
            ("STORAGE_BASE_PATH", "/data"),
            ("PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_generator_uses_configured_prefix() {
        let mut service = FileServiceConfig::with_storage_base_path("/data");
        service.stored_name_prefix = "CGI-".to_string();
        let name = Config(Box::new(service)).stored_name_generator().generate();
        assert!(name.starts_with("CGI-"));
    }
}
