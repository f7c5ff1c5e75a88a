//! Upload boundary: validation and on-disk storage of uploaded files.

use std::path::Path;

use thiserror::Error;

use crate::pipeline::UploadedFile;
use crate::utils::{dotted_extension, MediaType};

/// Message returned for disallowed file types.
pub const FILE_TYPE_ERROR: &str = "Error: Images and PDFs Only!";

/// Rejections raised before the analysis pipeline runs.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    NoFile,

    #[error("{}", FILE_TYPE_ERROR)]
    DisallowedType,

    #[error("File too large")]
    TooLarge,

    #[error("Malformed upload: {0}")]
    Malformed(String),

    #[error("Failed to store upload: {0}")]
    Storage(#[from] std::io::Error),
}

impl UploadError {
    /// Whether the client is at fault (400) rather than the server.
    pub fn is_validation(&self) -> bool {
        !matches!(self, UploadError::Storage(_))
    }
}

/// Check that both the declared MIME type and the file extension are allowed.
pub fn validate(
    original_name: &str,
    content_type: Option<&str>,
    size: usize,
    max_bytes: usize,
) -> Result<MediaType, UploadError> {
    let declared = content_type
        .and_then(MediaType::from_mime)
        .ok_or(UploadError::DisallowedType)?;
    let extension = dotted_extension(original_name);
    if MediaType::from_extension(extension.trim_start_matches('.')).is_none() {
        return Err(UploadError::DisallowedType);
    }

    if size > max_bytes {
        return Err(UploadError::TooLarge);
    }

    Ok(declared)
}

/// Unique name for a stored upload, keeping the original extension.
pub fn storage_name(original_name: &str) -> String {
    format!(
        "file-{}-{}{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        dotted_extension(original_name)
    )
}

/// Validate and write an upload into `upload_dir`.
pub async fn store(
    upload_dir: &Path,
    original_name: &str,
    content_type: Option<&str>,
    content: &[u8],
    max_bytes: usize,
) -> Result<UploadedFile, UploadError> {
    let media_type = validate(original_name, content_type, content.len(), max_bytes)?;

    let path = upload_dir.join(storage_name(original_name));
    tokio::fs::write(&path, content).await?;
    tracing::info!(
        "Stored upload {} ({} bytes) as {}",
        original_name,
        content.len(),
        path.display()
    );

    Ok(UploadedFile::new(path, media_type.as_str(), original_name))
}
