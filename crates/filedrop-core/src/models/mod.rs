//! Data models for the application
//!
//! `descriptor` holds the file identity model; `upload` holds the request and
//! response shapes built from it.

mod descriptor;
mod upload;

pub use descriptor::{FileDescriptor, Payload};
pub use upload::{Base64UploadItem, DescriptorResponse};
