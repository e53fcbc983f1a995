//! Wire types for the remote generative service.
//!
//! The service exposes JSON endpoints with camelCase payloads: a
//! generate-content call for text, a predict call for images, and a
//! long-running-operation pair (submit + refresh) for video. This module
//! holds the typed request/response shapes; HTTP plumbing lives in
//! [`crate::client`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Text enhancement (generateContent)
// ---------------------------------------------------------------------------

/// Request body for the text model.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

impl GenerateContentRequest {
    /// Single-turn user message carrying the given text.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![TextPart { text: text.into() }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<TextPart>,
}

/// A text fragment inside a content turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
}

/// Response from the text model.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<TextPart>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    ///
    /// Empty when the response carries no candidates or no text parts.
    pub fn text(&self) -> String {
        let Some(candidate) = self.candidates.first() else {
            return String::new();
        };
        candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Image synthesis (predict)
// ---------------------------------------------------------------------------

/// Request body for the image model.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRequest {
    pub instances: Vec<PromptInstance>,
    pub parameters: ImageParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptInstance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
    pub output_mime_type: String,
}

/// Response from the image model: zero or more generated payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub predictions: Vec<ImagePrediction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePrediction {
    pub bytes_base64_encoded: String,
    #[serde(default = "default_image_mime")]
    pub mime_type: String,
}

fn default_image_mime() -> String {
    "image/jpeg".to_string()
}

// ---------------------------------------------------------------------------
// Video synthesis (long-running operation)
// ---------------------------------------------------------------------------

/// Request body for the video model.
#[derive(Debug, Clone, Serialize)]
pub struct VideoRequest {
    pub instances: Vec<VideoInstance>,
    pub parameters: VideoParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoInstance {
    pub prompt: String,
    pub image: InlineImage,
}

/// Transport form of the source image: base64 payload plus media type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    pub sample_count: u32,
}

/// An in-flight (or finished) remote video operation.
///
/// The `name` token is opaque; it is resent verbatim on every refresh.
/// `done` stays `false` until the job resolves, after which exactly one
/// of `response` or `error` is populated.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoOperation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub response: Option<OperationResponse>,
    pub error: Option<OperationError>,
}

impl VideoOperation {
    /// Result locator of the first generated sample, if any.
    pub fn result_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .first()
            .map(|sample| sample.video.uri.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperationResponse {
    #[serde(rename = "generateVideoResponse")]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSample {
    pub video: VideoRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoRef {
    pub uri: String,
}

/// Terminal error reported by a finished operation.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationError {
    pub code: i32,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- GenerateContentResponse ---------------------------------------------

    #[test]
    fn response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "A golden"}, {"text": " retriever"}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "A golden retriever");
    }

    #[test]
    fn response_without_candidates_yields_empty_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn user_text_request_serializes_role_and_parts() {
        let request = GenerateContentRequest::user_text("hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    // -- ImageResponse -------------------------------------------------------

    #[test]
    fn image_prediction_defaults_to_jpeg() {
        let json = r#"{"predictions": [{"bytesBase64Encoded": "QUJD"}]}"#;
        let response: ImageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.predictions[0].mime_type, "image/jpeg");
    }

    #[test]
    fn empty_prediction_list_parses() {
        let response: ImageResponse = serde_json::from_str("{}").unwrap();
        assert!(response.predictions.is_empty());
    }

    // -- VideoOperation ------------------------------------------------------

    #[test]
    fn pending_operation_has_no_done_flag() {
        let json = r#"{"name": "operations/abc123"}"#;
        let op: VideoOperation = serde_json::from_str(json).unwrap();
        assert_eq!(op.name, "operations/abc123");
        assert!(!op.done);
        assert!(op.result_uri().is_none());
    }

    #[test]
    fn finished_operation_exposes_result_uri() {
        let json = r#"{
            "name": "operations/abc123",
            "done": true,
            "response": {
                "generateVideoResponse": {
                    "generatedSamples": [
                        {"video": {"uri": "https://media.example/v1/files/42:download?alt=media"}}
                    ]
                }
            }
        }"#;
        let op: VideoOperation = serde_json::from_str(json).unwrap();
        assert!(op.done);
        assert_eq!(
            op.result_uri(),
            Some("https://media.example/v1/files/42:download?alt=media")
        );
    }

    #[test]
    fn finished_operation_without_samples_has_no_uri() {
        let json = r#"{
            "name": "operations/abc123",
            "done": true,
            "response": {"generateVideoResponse": {"generatedSamples": []}}
        }"#;
        let op: VideoOperation = serde_json::from_str(json).unwrap();
        assert!(op.done);
        assert!(op.result_uri().is_none());
    }

    #[test]
    fn failed_operation_carries_error() {
        let json = r#"{
            "name": "operations/abc123",
            "done": true,
            "error": {"code": 13, "message": "internal failure"}
        }"#;
        let op: VideoOperation = serde_json::from_str(json).unwrap();
        let error = op.error.unwrap();
        assert_eq!(error.code, 13);
        assert_eq!(error.message, "internal failure");
    }
}
