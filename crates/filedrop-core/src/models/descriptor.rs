//! File identity and location model.
//!
//! A `FileDescriptor` is built once from its inputs and never mutated in place.
//! Changing an input goes through a consuming `with_*` method, which rebuilds
//! every derived field so `extension`, `storage_directory` and `stored_name`
//! cannot drift from the values they are computed from.

use bytes::Bytes;
use std::path::PathBuf;

use crate::naming::StoredNameGenerator;
use crate::paths::join_storage_directory;
use crate::validation::content_type_for_extension;

/// File content carried by an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload {
    /// No content attached (download lookups, or a missing upload body).
    #[default]
    Empty,
    /// Raw bytes from a multipart part.
    Bytes(Bytes),
    /// Base64 text from a JSON upload, decoded only at commit time.
    Base64(String),
}

impl Payload {
    /// True when there is nothing to write. A zero-length multipart part is
    /// still content; a blank base64 string is not.
    pub fn is_missing(&self) -> bool {
        match self {
            Payload::Empty => true,
            Payload::Bytes(_) => false,
            Payload::Base64(text) => text.trim().is_empty(),
        }
    }
}

/// One file's identity, as submitted and as it exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    logical_name: String,
    extension: Option<String>,
    size_bytes: u64,
    payload: Payload,
    storage_base_path: String,
    sub_path: String,
    keep_original_name: bool,
    storage_directory: String,
    stored_name: String,
}

/// Lower-cased text after the last `.`, if any.
fn extension_of(logical_name: &str) -> Option<String> {
    logical_name
        .rfind('.')
        .map(|idx| logical_name[idx + 1..].to_lowercase())
}

impl FileDescriptor {
    /// Build a descriptor for an incoming upload.
    ///
    /// With no logical name every derived field stays empty; such a descriptor
    /// is rejected by validation before any I/O happens.
    pub fn from_upload(
        logical_name: Option<&str>,
        size_bytes: u64,
        payload: Payload,
        storage_base_path: &str,
        sub_path: &str,
        keep_original_name: bool,
        names: &StoredNameGenerator,
    ) -> Self {
        let logical_name = logical_name.unwrap_or_default().to_string();
        let mut descriptor = Self {
            logical_name,
            extension: None,
            size_bytes,
            payload,
            storage_base_path: storage_base_path.to_string(),
            sub_path: sub_path.to_string(),
            keep_original_name,
            storage_directory: String::new(),
            stored_name: String::new(),
        };
        descriptor.derive_location();
        descriptor.derive_stored_name(names);
        descriptor
    }

    /// Build a descriptor that points at an already stored file.
    ///
    /// The stored name comes from the caller instead of being generated.
    pub fn for_download(
        logical_name: &str,
        storage_base_path: &str,
        sub_path: &str,
        stored_name: &str,
    ) -> Self {
        let mut descriptor = Self {
            logical_name: logical_name.to_string(),
            extension: None,
            size_bytes: 0,
            payload: Payload::Empty,
            storage_base_path: storage_base_path.to_string(),
            sub_path: sub_path.to_string(),
            keep_original_name: false,
            storage_directory: String::new(),
            stored_name: String::new(),
        };
        descriptor.derive_location();
        if descriptor.is_named() {
            descriptor.stored_name = stored_name.to_string();
        }
        descriptor
    }

    pub fn with_storage_base(mut self, storage_base_path: &str) -> Self {
        self.storage_base_path = storage_base_path.to_string();
        self.derive_location();
        self
    }

    pub fn with_sub_path(mut self, sub_path: &str) -> Self {
        self.sub_path = sub_path.to_string();
        self.derive_location();
        self
    }

    /// Only the stored name is re-derived; the directory is untouched.
    pub fn with_keep_original_name(
        mut self,
        keep_original_name: bool,
        names: &StoredNameGenerator,
    ) -> Self {
        self.keep_original_name = keep_original_name;
        self.derive_stored_name(names);
        self
    }

    /// Record the size observed on disk after a write.
    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }

    fn is_named(&self) -> bool {
        !self.logical_name.is_empty()
    }

    fn derive_location(&mut self) {
        if !self.is_named() {
            self.extension = None;
            self.storage_directory.clear();
            return;
        }
        self.extension = extension_of(&self.logical_name);
        self.storage_directory = join_storage_directory(&self.storage_base_path, &self.sub_path);
    }

    fn derive_stored_name(&mut self, names: &StoredNameGenerator) {
        self.stored_name = if !self.is_named() {
            String::new()
        } else if self.keep_original_name {
            self.logical_name.clone()
        } else {
            names.generate()
        };
    }

    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn storage_base_path(&self) -> &str {
        &self.storage_base_path
    }

    pub fn sub_path(&self) -> &str {
        &self.sub_path
    }

    pub fn keep_original_name(&self) -> bool {
        self.keep_original_name
    }

    pub fn storage_directory(&self) -> &str {
        &self.storage_directory
    }

    pub fn stored_name(&self) -> &str {
        &self.stored_name
    }

    /// Full path of the stored file: `storage_directory/stored_name`.
    pub fn stored_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_directory).join(&self.stored_name)
    }

    /// MIME type served on download.
    pub fn content_type(&self) -> &'static str {
        content_type_for_extension(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> StoredNameGenerator {
        StoredNameGenerator::fixed("abcde", 1_700_000_000_000)
    }

    fn upload(name: Option<&str>, keep: bool) -> FileDescriptor {
        FileDescriptor::from_upload(
            name,
            12,
            Payload::Bytes(Bytes::from_static(b"hello world!")),
            "/data/uploads/",
            "/notice/10001/",
            keep,
            &names(),
        )
    }

    #[test]
    fn test_extension_is_lowercased_after_last_dot() {
        assert_eq!(upload(Some("Report.PDF"), false).extension(), Some("pdf"));
        assert_eq!(upload(Some("archive.tar.GZ"), false).extension(), Some("gz"));
        assert_eq!(upload(Some("README"), false).extension(), None);
        assert_eq!(upload(Some(".env"), false).extension(), Some("env"));
    }

    #[test]
    fn test_derived_location() {
        let descriptor = upload(Some("report.pdf"), false);
        assert_eq!(descriptor.storage_directory(), "/data/uploads/notice/10001");
        assert_eq!(descriptor.stored_name(), "FD-abcde1700000000000");
        assert_eq!(
            descriptor.stored_path(),
            PathBuf::from("/data/uploads/notice/10001/FD-abcde1700000000000")
        );
        assert_eq!(descriptor.size_bytes(), 12);
    }

    #[test]
    fn test_keep_original_name_uses_logical_name() {
        let descriptor = upload(Some("report.pdf"), true);
        assert_eq!(descriptor.stored_name(), "report.pdf");
        assert!(descriptor.keep_original_name());
    }

    #[test]
    fn test_missing_logical_name_leaves_derived_fields_empty() {
        let descriptor = upload(None, true);
        assert_eq!(descriptor.logical_name(), "");
        assert_eq!(descriptor.extension(), None);
        assert_eq!(descriptor.storage_directory(), "");
        assert_eq!(descriptor.stored_name(), "");
    }

    #[test]
    fn test_with_sub_path_rederives_directory_only() {
        let descriptor = upload(Some("photo.png"), false);
        let stored_name = descriptor.stored_name().to_string();
        let moved = descriptor.with_sub_path("board/7");
        assert_eq!(moved.storage_directory(), "/data/uploads/board/7");
        assert_eq!(moved.stored_name(), stored_name);
        assert_eq!(moved.extension(), Some("png"));
    }

    #[test]
    fn test_with_storage_base() {
        let descriptor = upload(Some("photo.png"), false).with_storage_base("/srv/files");
        assert_eq!(descriptor.storage_directory(), "/srv/files/notice/10001");
    }

    #[test]
    fn test_with_keep_original_name_rederives_stored_name_only() {
        let descriptor = upload(Some("photo.png"), false);
        let directory = descriptor.storage_directory().to_string();
        let kept = descriptor.with_keep_original_name(true, &names());
        assert_eq!(kept.stored_name(), "photo.png");
        assert_eq!(kept.storage_directory(), directory);

        let generated = kept.with_keep_original_name(false, &names());
        assert_eq!(generated.stored_name(), "FD-abcde1700000000000");
    }

    #[test]
    fn test_empty_sub_path_uses_base_alone() {
        let descriptor = FileDescriptor::from_upload(
            Some("a.txt"),
            0,
            Payload::Empty,
            "/data/uploads/",
            "",
            true,
            &names(),
        );
        assert_eq!(descriptor.storage_directory(), "/data/uploads");
    }

    #[test]
    fn test_distinct_millis_give_distinct_stored_names() {
        let first = FileDescriptor::from_upload(
            Some("a.txt"),
            0,
            Payload::Empty,
            "/b",
            "s",
            false,
            &StoredNameGenerator::fixed("qWeRt", 1_718_000_000_000),
        );
        let second = FileDescriptor::from_upload(
            Some("a.txt"),
            0,
            Payload::Empty,
            "/b",
            "s",
            false,
            &StoredNameGenerator::fixed("qWeRt", 1_718_000_000_001),
        );
        assert_ne!(first.stored_name(), second.stored_name());
    }

    #[test]
    fn test_for_download_keeps_given_stored_name() {
        let descriptor = FileDescriptor::for_download(
            "photo.png",
            "/data/uploads",
            "notice/10001",
            "FD-xyzab1700000000000",
        );
        assert_eq!(descriptor.stored_name(), "FD-xyzab1700000000000");
        assert_eq!(descriptor.content_type(), "image/png");
        assert!(descriptor.payload().is_missing());
    }

    #[test]
    fn test_payload_is_missing() {
        assert!(Payload::Empty.is_missing());
        assert!(Payload::Base64("  ".to_string()).is_missing());
        assert!(!Payload::Base64("aGk=".to_string()).is_missing());
        assert!(!Payload::Bytes(Bytes::new()).is_missing());
        assert!(!Payload::Bytes(Bytes::from_static(b"x")).is_missing());
    }
}
