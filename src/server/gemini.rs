//! Upstream client: one `generateContent` call to the hosted vision model.
//!
//! The request mirrors the Gemini REST shape — a single user turn whose
//! parts are the instruction text followed by the inline page images, in
//! page order. The response text is the concatenation of the first
//! candidate's text parts. Nothing else from the response is interpreted.

use crate::wire::ImagePart;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Failure of the single outbound model call.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream response contained no text")]
    EmptyResponse,
}

// ── Request shape ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineBlob,
    },
}

#[derive(Serialize)]
struct InlineBlob {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

// ── Response shape ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Call `models/{model}:generateContent` with the prompt and page images.
pub async fn generate_content(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
    images: &[ImagePart],
) -> Result<String, GeminiError> {
    let mut parts = Vec::with_capacity(images.len() + 1);
    parts.push(Part::Text {
        text: prompt.to_string(),
    });
    for image in images {
        parts.push(Part::Inline {
            inline_data: InlineBlob {
                mime_type: image.inline_data.mime_type.clone(),
                data: image.inline_data.data.clone(),
            },
        });
    }

    let body = GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts,
        }],
    };

    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    );
    debug!("Calling upstream model {model} with {} images", images.len());

    let response = http
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GeminiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let parsed: GenerateContentResponse = response.json().await?;
    let text: String = parsed
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|c| {
            c.parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GeminiError::EmptyResponse);
    }
    Ok(text)
}
