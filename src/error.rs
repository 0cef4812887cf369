//! Error types for the paperlens library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ExtractError`] — the extraction job failed. Every variant is terminal
//!   for the current upload: there is no retry or partial-result recovery
//!   anywhere in the pipeline. The session surfaces these through
//!   [`ExtractError::user_message`] and moves to the error state, from which
//!   a reset fully recovers.
//!
//! * [`ExportError`] — the PDF export failed. Export runs against text the
//!   session already holds, so an export failure never invalidates the
//!   extraction result; the caller may simply retry the export.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can abort an extraction job.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The declared MIME type of the uploaded file is not `application/pdf`.
    #[error("Invalid file type. Please upload a PDF file.")]
    InvalidFileType { mime_type: String },

    /// Input file was not found at the given path.
    #[error("File not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// The PDF bytes could not be opened as a document.
    #[error("Failed to read the PDF file: {detail}")]
    UnreadablePdf { detail: String },

    /// pdfium returned an error for a specific page.
    #[error("Failed to convert page {page} to an image: {detail}")]
    RenderFailed { page: usize, detail: String },

    /// JPEG encoding of a rendered page failed.
    #[error("Failed to encode page {page}: {detail}")]
    EncodeFailed { page: usize, detail: String },

    // ── Transport errors ──────────────────────────────────────────────────
    /// The extraction endpoint could not be reached at all.
    #[error("API request failed: {detail}")]
    RelayUnreachable { detail: String },

    /// The extraction endpoint answered with a non-success status.
    /// The response body is carried verbatim as the error detail.
    #[error("API request failed: {body}")]
    RelayFailed { status: u16, body: String },

    /// The extraction endpoint answered 2xx but the body did not expose a
    /// `text` field.
    #[error("Unexpected response from extraction service: {detail}")]
    InvalidResponse { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium or install pdfium system-wide."
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// The message shown to the user when this error ends a job.
    ///
    /// The invalid-type rejection happens before processing starts and is
    /// surfaced verbatim; everything that fails mid-job is wrapped in the
    /// "Failed to process PDF" prefix.
    pub fn user_message(&self) -> String {
        match self {
            ExtractError::InvalidFileType { .. } => self.to_string(),
            other => format!("Failed to process PDF: {other}"),
        }
    }
}

/// Errors raised while exporting extracted text to a PDF file.
///
/// These never touch the session's extraction result.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The supplied TTF font file could not be read or parsed.
    #[error("Failed to load font '{path}': {detail}")]
    FontLoadFailed { path: PathBuf, detail: String },

    /// PDF document generation failed.
    #[error("Failed to generate PDF: {detail}")]
    Generation { detail: String },

    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_file_type_message_is_verbatim() {
        let e = ExtractError::InvalidFileType {
            mime_type: "image/png".into(),
        };
        assert_eq!(e.user_message(), "Invalid file type. Please upload a PDF file.");
    }

    #[test]
    fn mid_job_errors_get_the_process_prefix() {
        let e = ExtractError::UnreadablePdf {
            detail: "bad xref".into(),
        };
        let msg = e.user_message();
        assert!(msg.starts_with("Failed to process PDF: "), "got: {msg}");
        assert!(msg.contains("bad xref"));
    }

    #[test]
    fn relay_failure_carries_the_response_body() {
        let e = ExtractError::RelayFailed {
            status: 500,
            body: "An error occurred on the server.".into(),
        };
        assert!(e.to_string().contains("An error occurred on the server."));
    }

    #[test]
    fn export_write_failed_display() {
        let e = ExportError::WriteFailed {
            path: PathBuf::from("/nope/out.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(e.to_string().contains("/nope/out.pdf"));
    }
}
