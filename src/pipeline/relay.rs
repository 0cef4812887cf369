//! Extraction relay client: the single network call of an extraction job.
//!
//! The client assembles one [`ExtractRequest`] — the ordered image sequence
//! plus the fixed instruction string — and POSTs it to the configured relay
//! endpoint. On a non-success status the response body becomes the error
//! detail verbatim; on success the `text` field is returned untouched. No
//! retries, no post-processing, no schema validation beyond the presence of
//! `text`.

use crate::error::ExtractError;
use crate::wire::{ExtractRequest, ExtractResponse, ImagePart};
use tracing::{debug, info};

/// HTTP client for the `POST /api/extract` relay endpoint.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    /// Create a client for the given endpoint URL.
    ///
    /// No explicit timeouts are configured; the underlying stack's defaults
    /// apply.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the ordered page images and the instruction string; return the
    /// model's text verbatim.
    pub async fn send(
        &self,
        image_parts: Vec<ImagePart>,
        prompt: &str,
    ) -> Result<String, ExtractError> {
        let request = ExtractRequest {
            image_parts,
            prompt: prompt.to_string(),
        };
        debug!(
            "Sending {} image parts to {}",
            request.image_parts.len(),
            self.endpoint
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::RelayUnreachable {
                detail: format!("{e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::RelayFailed {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ExtractResponse =
            response
                .json()
                .await
                .map_err(|e| ExtractError::InvalidResponse {
                    detail: format!("{e}"),
                })?;

        info!("Extraction relay returned {} bytes of text", parsed.text.len());
        Ok(parsed.text)
    }
}
