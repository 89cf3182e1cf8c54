pub mod base64_upload;
pub mod file_download;
pub mod file_upload;
