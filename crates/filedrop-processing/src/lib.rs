//! Filedrop Processing Library
//!
//! This crate provides the upload policy: extension rules applied to a
//! `FileDescriptor`, followed by committing its content through a `FileStore`,
//! and the reverse lookup used for downloads.

pub mod codec;
pub mod policy;
pub mod validator;

pub use codec::{decode_base64, encode_base64};
pub use policy::{DownloadedFile, UploadError, UploadPolicy, UploadRequest};
pub use validator::{UploadValidator, ValidationError};
