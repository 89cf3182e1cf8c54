use filedrop_core::paths::has_parent_segment;
use filedrop_core::{AppError, ExtensionRules, FileDescriptor};

/// Reasons an upload is refused before any I/O
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("filename is required")]
    MissingFilename,

    #[error("subPath is required")]
    MissingSubPath,

    #[error("file content is required")]
    MissingContent,

    #[error("subPath must not contain '..' segments: {0}")]
    UnsafeSubPath(String),

    #[error("Invalid stored filename: {0}")]
    UnsafeStoredName(String),

    #[error("Extension not allowed [{extension}]")]
    DeniedExtension { extension: String },

    #[error("Not an image file extension [{}]", extension.as_deref().unwrap_or(""))]
    NotAnImage { extension: Option<String> },
}

impl ValidationError {
    /// True for rule rejections, false for malformed input.
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            ValidationError::DeniedExtension { .. } | ValidationError::NotAnImage { .. }
        )
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        if err.is_policy_violation() {
            AppError::PolicyViolation(err.to_string())
        } else {
            AppError::InvalidInput(err.to_string())
        }
    }
}

fn is_unsafe_file_name(name: &str) -> bool {
    name == "." || name == ".." || name.contains(['/', '\\'])
}

/// Upload rule checker
///
/// Holds the extension rules and applies them to descriptors without touching
/// storage.
#[derive(Debug, Clone, Default)]
pub struct UploadValidator {
    rules: ExtensionRules,
}

impl UploadValidator {
    pub fn new(rules: ExtensionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ExtensionRules {
        &self.rules
    }

    pub fn is_denied_extension(&self, descriptor: &FileDescriptor) -> bool {
        self.rules.is_denied(descriptor.extension())
    }

    pub fn is_image_extension(&self, descriptor: &FileDescriptor) -> bool {
        self.rules.is_image(descriptor.extension())
    }

    /// Identity and path checks shared by uploads and downloads.
    fn validate_location(&self, descriptor: &FileDescriptor) -> Result<(), ValidationError> {
        if descriptor.logical_name().trim().is_empty() {
            return Err(ValidationError::MissingFilename);
        }

        if descriptor.sub_path().trim().is_empty() {
            return Err(ValidationError::MissingSubPath);
        }

        if has_parent_segment(descriptor.sub_path()) {
            return Err(ValidationError::UnsafeSubPath(
                descriptor.sub_path().to_string(),
            ));
        }

        if is_unsafe_file_name(descriptor.stored_name()) {
            return Err(ValidationError::UnsafeStoredName(
                descriptor.stored_name().to_string(),
            ));
        }

        Ok(())
    }

    /// Required fields, path safety and presence of content.
    pub fn validate_required(&self, descriptor: &FileDescriptor) -> Result<(), ValidationError> {
        self.validate_location(descriptor)?;

        if descriptor.payload().is_missing() {
            return Err(ValidationError::MissingContent);
        }

        Ok(())
    }

    pub fn validate_extension(&self, descriptor: &FileDescriptor) -> Result<(), ValidationError> {
        if self.is_denied_extension(descriptor) {
            return Err(ValidationError::DeniedExtension {
                extension: descriptor.extension().unwrap_or_default().to_string(),
            });
        }
        Ok(())
    }

    pub fn validate_image(&self, descriptor: &FileDescriptor) -> Result<(), ValidationError> {
        if !self.is_image_extension(descriptor) {
            return Err(ValidationError::NotAnImage {
                extension: descriptor.extension().map(str::to_string),
            });
        }
        Ok(())
    }

    /// Full upload check, in order: required fields, deny-list, image-only.
    pub fn validate_all(
        &self,
        descriptor: &FileDescriptor,
        image_only: bool,
    ) -> Result<(), ValidationError> {
        self.validate_required(descriptor)?;
        self.validate_extension(descriptor)?;
        if image_only {
            self.validate_image(descriptor)?;
        }
        Ok(())
    }

    /// Check a descriptor that addresses an already stored file.
    pub fn validate_download(&self, descriptor: &FileDescriptor) -> Result<(), ValidationError> {
        self.validate_location(descriptor)?;
        if descriptor.stored_name().trim().is_empty() {
            return Err(ValidationError::UnsafeStoredName(String::new()));
        }
        Ok(())
    }
}
