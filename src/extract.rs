//! The extraction job: intake → rasterise → relay, strictly in that order.
//!
//! One upload is one job. The flow is linear with two suspend points (the
//! rasterisation loop on the blocking pool and the relay call); progress is
//! observable between them through the configured callback. There is no
//! cancellation: once started, a job runs to completion or failure.
//!
//! Progress milestones, in order:
//!
//! | percentage | message |
//! |-----------:|---------|
//! | 5          | `Reading PDF file...` |
//! | (10, 80]   | `Converting page {n} of {total} to image...`, one per page |
//! | 85         | `Extracting text with Gemini AI...` |
//! | 95         | `Finalizing result...` |

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::intake::{self, UploadFile};
use crate::pipeline::{relay::RelayClient, render};
use crate::prompts::EXTRACTION_PROMPT;
use tracing::info;

/// Run one extraction job and return the model's text verbatim.
///
/// Validation happens before anything else: a file whose declared type is
/// not `application/pdf` is rejected without a single progress event and
/// without touching the rasteriser.
pub async fn extract(
    file: &UploadFile,
    config: &ExtractionConfig,
    relay: &RelayClient,
) -> Result<String, ExtractError> {
    intake::validate(file)?;
    info!("Starting extraction: {}", file.name);

    config.report("Reading PDF file...", 5.0);
    let image_parts = render::rasterize(file.bytes.clone(), config).await?;

    config.report("Extracting text with Gemini AI...", 85.0);
    let text = relay.send(image_parts, EXTRACTION_PROMPT).await?;

    config.report("Finalizing result...", 95.0);
    info!("Extraction complete: {} bytes", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ExtractionProgress;
    use std::sync::{Arc, Mutex};

    struct Recorder(Mutex<Vec<(String, f32)>>);

    impl ExtractionProgress for Recorder {
        fn on_progress(&self, message: &str, percentage: f32) {
            self.0.lock().unwrap().push((message.to_string(), percentage));
        }
    }

    #[tokio::test]
    async fn invalid_mime_is_rejected_before_any_work() {
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let config = ExtractionConfig::builder()
            .progress_callback(recorder.clone())
            .build()
            .unwrap();
        let relay = RelayClient::new("http://127.0.0.1:1/api/extract");

        let file = UploadFile::new("notes.png", "image/png", vec![1, 2, 3]);
        let err = extract(&file, &config, &relay).await.unwrap_err();

        assert!(matches!(err, ExtractError::InvalidFileType { .. }));
        // The rasteriser was never invoked: not one progress event fired.
        assert!(recorder.0.lock().unwrap().is_empty());
    }
}
