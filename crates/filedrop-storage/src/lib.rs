//! Filedrop Storage Library
//!
//! This crate provides the filesystem abstraction used to commit uploads and
//! serve downloads. It includes the `FileStore` trait and a local filesystem
//! implementation.
//!
//! # Path layout
//!
//! Stores work on full paths built by `FileDescriptor`:
//! `{storage_directory}/{stored_name}`, where the directory is the configured
//! base path joined with the caller's sub path. A store only touches paths that
//! lie lexically under its root.

pub mod factory;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_store;
pub use local::LocalFileStore;
pub use traits::{FileStore, StorageError, StorageResult};
