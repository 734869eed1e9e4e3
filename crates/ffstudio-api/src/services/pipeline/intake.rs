//! Multipart intake
//!
//! Reads the form once, streaming each file field into the request scope and
//! collecting the text fields the operation asks for.

use std::collections::HashMap;
use std::path::PathBuf;

use axum::extract::multipart::{Field, Multipart, MultipartError};
use ffstudio_core::{AppError, OperationKind, UploadSlot};
use ffstudio_processing::{RequestScope, UploadValidator, ValidationError};
use tokio::io::AsyncWriteExt;

use crate::constants::MAX_TEXT_FIELD_BYTES;

/// A file persisted in the request scope
#[derive(Debug)]
pub struct ReceivedUpload {
    pub field: &'static str,
    pub path: PathBuf,
    pub extension: String,
    pub size: usize,
}

#[derive(Debug)]
pub struct ReceivedForm {
    /// In the order of the operation's upload slots
    pub uploads: Vec<ReceivedUpload>,
    pub fields: HashMap<String, String>,
}

impl ReceivedForm {
    pub fn input_paths(&self) -> Vec<PathBuf> {
        self.uploads.iter().map(|u| u.path.clone()).collect()
    }

    pub fn primary_extension(&self) -> &str {
        self.uploads
            .first()
            .map(|u| u.extension.as_str())
            .unwrap_or_default()
    }
}

fn multipart_error(err: MultipartError) -> ValidationError {
    ValidationError::Multipart(err.body_text())
}

/// Drain the form. Paths are allocated in `scope` before any byte is
/// written, so every file created here is removed with the scope.
pub async fn receive(
    validator: &UploadValidator,
    kind: OperationKind,
    mut multipart: Multipart,
    scope: &mut RequestScope,
) -> Result<ReceivedForm, AppError> {
    let mut received: Vec<ReceivedUpload> = Vec::new();
    let mut fields = HashMap::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(slot) = kind.upload_slot(&name) {
            if received.iter().any(|u| u.field == slot.field) {
                return Err(ValidationError::DuplicateFile(name).into());
            }
            let upload = persist_file(validator, slot, field, scope).await?;
            tracing::debug!(
                field = upload.field,
                size = upload.size,
                path = %upload.path.display(),
                "Upload persisted"
            );
            received.push(upload);
        } else if field.file_name().is_some() {
            tracing::debug!(field = %name, "Ignoring unexpected file field");
        } else if kind.required_fields().contains(&name.as_str()) {
            let value = read_text_field(&name, field).await?;
            fields.insert(name, value);
        }
    }

    let mut uploads = Vec::with_capacity(kind.uploads().len());
    for slot in kind.uploads() {
        let index = received
            .iter()
            .position(|u| u.field == slot.field)
            .ok_or_else(|| ValidationError::MissingFile(slot.field.to_string()))?;
        uploads.push(received.swap_remove(index));
    }

    Ok(ReceivedForm { uploads, fields })
}

/// Text values are short; reading stops at the first chunk past the cap.
async fn read_text_field(name: &str, mut field: Field<'_>) -> Result<String, ValidationError> {
    let mut value = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if value.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(ValidationError::invalid(name, "value is too long"));
        }
        value.extend_from_slice(&chunk);
    }
    String::from_utf8(value).map_err(|_| ValidationError::invalid(name, "value is not UTF-8 text"))
}

async fn persist_file(
    validator: &UploadValidator,
    slot: UploadSlot,
    mut field: Field<'_>,
    scope: &mut RequestScope,
) -> Result<ReceivedUpload, AppError> {
    let filename = field
        .file_name()
        .filter(|f| !f.is_empty())
        .map(|f| f.to_string())
        .ok_or_else(|| ValidationError::MissingFilename(slot.field.to_string()))?;

    // Type check happens before the file exists
    let extension = validator.validate_extension(slot.category, &filename)?;

    let path = scope.allocate(&extension);
    let mut file = tokio::fs::File::create(&path).await?;

    let mut size = 0usize;
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        size = size.saturating_add(chunk.len());
        validator.validate_running_size(size)?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    validator.validate_file_size(slot.field, size)?;

    Ok(ReceivedUpload {
        field: slot.field,
        path,
        extension,
        size,
    })
}
