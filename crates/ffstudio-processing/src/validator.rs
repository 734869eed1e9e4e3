use ffstudio_core::{AppError, MediaCategory};
use std::path::Path;

/// Validation errors for uploads and form parameters
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: more than {max} bytes")]
    FileTooLarge { max: usize },

    #[error("Invalid file type '{extension}' for {category} (allowed: {allowed})")]
    InvalidExtension {
        extension: String,
        category: MediaCategory,
        allowed: String,
    },

    #[error("Missing file extension (filename: {0})")]
    MissingExtension(String),

    #[error("Missing filename for upload field '{0}'")]
    MissingFilename(String),

    #[error("Missing upload field '{0}'")]
    MissingFile(String),

    #[error("Upload field '{0}' was sent more than once")]
    DuplicateFile(String),

    #[error("Empty file in upload field '{0}'")]
    EmptyFile(String),

    #[error("Missing form field '{0}'")]
    MissingField(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Malformed multipart request: {0}")]
    Multipart(String),
}

impl ValidationError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidParameter {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Upload validator
///
/// One validator serves every route: the category passed in selects the
/// extension allow-list, and the size ceiling is shared.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
}

impl UploadValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate the filename extension against the category allow-list.
    /// Returns the lower-cased extension.
    pub fn validate_extension(
        &self,
        category: MediaCategory,
        filename: &str,
    ) -> Result<String, ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;

        if !category.allows(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                category,
                allowed: category.allowed_extensions().join(", "),
            });
        }

        Ok(extension)
    }

    /// Validate a running byte count. Called before each chunk is written,
    /// so an oversized upload is rejected before it reaches the ceiling on disk.
    pub fn validate_running_size(&self, received: usize) -> Result<(), ValidationError> {
        if received > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Validate the final size of a completed upload
    pub fn validate_file_size(&self, field: &str, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile(field.to_string()));
        }
        self.validate_running_size(size)
    }
}
