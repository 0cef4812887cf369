//! Wire types shared by the relay client and the proxy server.
//!
//! The JSON field names are part of the endpoint contract
//! (`POST /api/extract`), hence the explicit `rename` attributes rather than
//! a blanket `rename_all`: the shape must stay byte-compatible even if Rust
//! naming conventions drift.

use serde::{Deserialize, Serialize};

/// One base64-encoded page image plus its MIME tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineData {
    /// Bare base64 payload — no `data:` URI prefix.
    pub data: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Envelope for a single page image in the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePart {
    #[serde(rename = "inlineData")]
    pub inline_data: InlineData,
}

impl ImagePart {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            inline_data: InlineData {
                data: data.into(),
                mime_type: mime_type.into(),
            },
        }
    }
}

/// Request body for `POST /api/extract`: the ordered page images plus the
/// instruction string. Constructed once per upload; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRequest {
    #[serde(rename = "imageParts")]
    pub image_parts: Vec<ImagePart>,
    pub prompt: String,
}

/// Success response body: the model's output text, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialises_with_camel_case_field_names() {
        let req = ExtractRequest {
            image_parts: vec![ImagePart::new("aGVsbG8=", "image/jpeg")],
            prompt: "extract".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("imageParts").is_some());
        assert_eq!(
            json["imageParts"][0]["inlineData"]["mimeType"],
            "image/jpeg"
        );
        assert_eq!(json["imageParts"][0]["inlineData"]["data"], "aGVsbG8=");
        assert_eq!(json["prompt"], "extract");
    }

    #[test]
    fn request_round_trips() {
        let req = ExtractRequest {
            image_parts: vec![
                ImagePart::new("cGFnZTE=", "image/jpeg"),
                ImagePart::new("cGFnZTI=", "image/jpeg"),
            ],
            prompt: "p".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: ExtractRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn response_requires_text_field() {
        assert!(serde_json::from_str::<ExtractResponse>("{}").is_err());
        let ok: ExtractResponse = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(ok.text, "hi");
    }
}
