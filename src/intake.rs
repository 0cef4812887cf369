//! File intake and validation.
//!
//! Validation is intentionally shallow: only the declared MIME type is
//! checked, before any byte of the file is parsed. A file that claims to be
//! a PDF but is corrupt is rejected later by the rasterizer with its own
//! error; a file that does not claim to be a PDF never reaches the
//! rasterizer at all.

use crate::error::ExtractError;
use std::path::Path;

/// The only MIME type the intake accepts.
pub const PDF_MIME: &str = "application/pdf";

/// A candidate upload: name, declared type, and raw bytes.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original file name, kept for progress display and for deriving the
    /// export file name.
    pub name: String,
    /// Declared MIME type. For path-based intake this is inferred from the
    /// file extension.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, inferring the MIME type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|_| ExtractError::FileNotFound {
                path: path.to_path_buf(),
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            mime_type: mime_type_for(path).to_string(),
            bytes,
        })
    }
}

/// Infer the declared MIME type from a path's extension.
fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => PDF_MIME,
        _ => "application/octet-stream",
    }
}

/// Accept or reject an upload based on its declared type.
pub fn validate(file: &UploadFile) -> Result<(), ExtractError> {
    if file.mime_type != PDF_MIME {
        return Err(ExtractError::InvalidFileType {
            mime_type: file.mime_type.clone(),
        });
    }
    Ok(())
}
