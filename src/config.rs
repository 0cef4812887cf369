//! Configuration for an extraction run.
//!
//! Everything an extraction job can vary on lives in [`ExtractionConfig`],
//! built via its builder. Keeping every knob in one struct makes it trivial
//! to share configs across tasks and to see at a glance why two runs behaved
//! differently.
//!
//! Deliberately absent: network timeouts. The pipeline runs on whatever the
//! HTTP stack defaults to, and an in-flight job always runs to completion or
//! failure.

use crate::error::ExtractError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Default page zoom factor. 1.5× of the intrinsic page size is enough for
/// a vision model to read typical question-paper print while keeping the
/// JPEG payloads small.
pub const DEFAULT_ZOOM: f32 = 1.5;

/// Default JPEG quality (1–100).
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Default extraction endpoint of a locally running relay
/// (`paperlens serve`).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/api/extract";

/// Configuration for one extraction job.
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Page zoom factor used when rasterising. Range: 0.5–4.0. Default: 1.5.
    pub zoom: f32,

    /// JPEG encode quality, 1–100. Default: 92.
    pub jpeg_quality: u8,

    /// URL of the extraction relay endpoint. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Optional progress callback, invoked between pipeline steps.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("zoom", &self.zoom)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("endpoint", &self.endpoint)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ExtractionProgress>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Emit a progress event if a callback is configured.
    pub(crate) fn report(&self, message: &str, percentage: f32) {
        if let Some(ref cb) = self.progress_callback {
            cb.on_progress(message, percentage);
        }
    }
}

/// Builder for [`ExtractionConfig`].
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn zoom(mut self, zoom: f32) -> Self {
        self.config.zoom = zoom.clamp(0.5, 4.0);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let c = &self.config;
        if c.endpoint.is_empty() {
            return Err(ExtractError::InvalidConfig(
                "Endpoint URL must not be empty".into(),
            ));
        }
        if !(0.5..=4.0).contains(&c.zoom) {
            return Err(ExtractError::InvalidConfig(format!(
                "Zoom must be 0.5–4.0, got {}",
                c.zoom
            )));
        }
        Ok(self.config)
    }
}
