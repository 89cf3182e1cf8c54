//! Extension rules and content-type resolution.
//!
//! The deny-list and the image set are data: the defaults below can be replaced
//! from configuration or built directly in tests.

use std::collections::BTreeSet;

/// Extensions that are never stored: executables, scripts and config files.
pub const DEFAULT_DENIED_EXTENSIONS: &[&str] = &[
    "asp", "jsp", "php", "js", "xml", "json", "yml", "yaml", "properties", "exe", "bat", "com",
    "ini", "conf", "pl", "rb", "ry", "py", "pyc", "pyd", "pyo", "gradle", "sh", "zsh", "csh",
    "deb", "rpm",
];

/// Extensions accepted when an upload is flagged image-only.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["gif", "png", "jpg", "jpeg"];

/// Fallback MIME type for anything that is not a known image.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Map an already lower-cased extension to the MIME type served on download.
pub fn content_type_for_extension(extension: Option<&str>) -> &'static str {
    match extension {
        Some("gif") => "image/gif",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => OCTET_STREAM,
    }
}

/// Deny-list and image set consulted by the upload policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRules {
    denied: BTreeSet<String>,
    images: BTreeSet<String>,
}

impl ExtensionRules {
    pub fn new<D, I, S, T>(denied: D, images: I) -> Self
    where
        D: IntoIterator<Item = S>,
        I: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            denied: normalize(denied),
            images: normalize(images),
        }
    }

    pub fn is_denied(&self, extension: Option<&str>) -> bool {
        extension.is_some_and(|ext| self.denied.contains(&ext.to_lowercase()))
    }

    pub fn is_image(&self, extension: Option<&str>) -> bool {
        extension.is_some_and(|ext| self.images.contains(&ext.to_lowercase()))
    }

    pub fn denied(&self) -> impl Iterator<Item = &str> {
        self.denied.iter().map(String::as_str)
    }

    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(String::as_str)
    }
}

impl Default for ExtensionRules {
    fn default() -> Self {
        Self::new(DEFAULT_DENIED_EXTENSIONS, DEFAULT_IMAGE_EXTENSIONS)
    }
}

fn normalize<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
