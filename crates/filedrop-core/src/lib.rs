//! Filedrop Core Library
//!
//! This crate provides the file-identity model, path resolution, extension rules,
//! error types and configuration shared by every Filedrop component.

pub mod config;
pub mod error;
pub mod models;
pub mod naming;
pub mod paths;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, FileServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Base64UploadItem, DescriptorResponse, FileDescriptor, Payload};
pub use naming::{FixedEntropy, NameEntropy, StoredNameGenerator, SystemEntropy};
pub use paths::{to_base_path, to_sub_path};
pub use validation::{content_type_for_extension, ExtensionRules};
