//! HTTP client for the remote generative service, using [`reqwest`].
//!
//! Endpoints follow the service's model-method URL scheme
//! (`{base}/models/{model}:{method}`) with the credential supplied as a
//! `key` query parameter on every call, including result downloads.

use base64::Engine;
use bytes::Bytes;
use reelsmith_core::config::StudioConfig;
use reelsmith_core::types::{AspectRatio, SourceImage};

use crate::messages::{
    GenerateContentRequest, GenerateContentResponse, ImageParameters, ImageRequest, ImageResponse,
    InlineImage, PromptInstance, VideoInstance, VideoOperation, VideoParameters, VideoRequest,
};

// ---------------------------------------------------------------------------
// Model identifiers
// ---------------------------------------------------------------------------

/// Text model used for prompt enhancement.
pub const TEXT_MODEL: &str = "gemini-2.5-flash";
/// Image synthesis model.
pub const IMAGE_MODEL: &str = "imagen-4.0-generate-001";
/// Video synthesis model.
pub const VIDEO_MODEL: &str = "veo-2.0-generate-001";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the generative service REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Generative service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered 2xx but the payload was unusable.
    #[error("Malformed response from generative service: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Result payloads
// ---------------------------------------------------------------------------

/// A decoded image returned by the image model.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Bytes,
    pub media_type: String,
}

/// Raw media fetched from a result locator.
#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub bytes: Bytes,
    /// Content type reported by the server, when present.
    pub media_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for one remote generative service.
///
/// The credential is injected via [`StudioConfig`]; the client never
/// reads ambient environment state.
pub struct GenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GenAiClient {
    /// Create a client from validated configuration.
    pub fn new(config: &StudioConfig) -> Result<Self, GenAiError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self::with_client(http, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for connection pooling across components).
    pub fn with_client(http: reqwest::Client, config: &StudioConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Ask the text model to rewrite a prompt.
    ///
    /// Returns the trimmed response text. An empty answer is treated as
    /// malformed: the enhancement contract is "rewritten prompt only".
    pub async fn enhance_text(&self, prompt: &str) -> Result<String, GenAiError> {
        let url = self.model_url(TEXT_MODEL, "generateContent");
        let body = GenerateContentRequest::user_text(prompt);

        let response = self.http.post(&url).json(&body).send().await?;
        let parsed: GenerateContentResponse = Self::parse_response(response).await?;

        let text = parsed.text().trim().to_string();
        if text.is_empty() {
            return Err(GenAiError::Malformed(
                "enhancement response contained no text".to_string(),
            ));
        }
        Ok(text)
    }

    /// Synthesize still images for a prompt.
    ///
    /// Returns the decoded payloads; the list may be empty if the
    /// service produced nothing (the caller decides whether that is an
    /// error).
    pub async fn generate_images(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
        count: u32,
    ) -> Result<Vec<GeneratedImage>, GenAiError> {
        let url = self.model_url(IMAGE_MODEL, "predict");
        let body = ImageRequest {
            instances: vec![PromptInstance {
                prompt: prompt.to_string(),
            }],
            parameters: ImageParameters {
                sample_count: count,
                aspect_ratio: aspect_ratio.as_str().to_string(),
                output_mime_type: "image/jpeg".to_string(),
            },
        };

        let response = self.http.post(&url).json(&body).send().await?;
        let parsed: ImageResponse = Self::parse_response(response).await?;

        parsed
            .predictions
            .into_iter()
            .map(|prediction| {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(&prediction.bytes_base64_encoded)
                    .map_err(|e| {
                        GenAiError::Malformed(format!("image payload is not valid base64: {e}"))
                    })?;
                Ok(GeneratedImage {
                    bytes: Bytes::from(bytes),
                    media_type: prediction.mime_type,
                })
            })
            .collect()
    }

    /// Submit a video generation job.
    ///
    /// The source image is encoded into the transport form (base64 plus
    /// declared media type) and sent alongside the prompt. Returns the
    /// initial operation handle.
    pub async fn submit_video(
        &self,
        prompt: &str,
        image: &SourceImage,
    ) -> Result<VideoOperation, GenAiError> {
        let url = self.model_url(VIDEO_MODEL, "predictLongRunning");
        let body = VideoRequest {
            instances: vec![VideoInstance {
                prompt: prompt.to_string(),
                image: InlineImage {
                    bytes_base64_encoded: base64::engine::general_purpose::STANDARD
                        .encode(image.bytes()),
                    mime_type: image.media_type().to_string(),
                },
            }],
            parameters: VideoParameters { sample_count: 1 },
        };

        let response = self.http.post(&url).json(&body).send().await?;
        let operation: VideoOperation = Self::parse_response(response).await?;

        if operation.name.is_empty() {
            return Err(GenAiError::Malformed(
                "submission returned an operation without a name".to_string(),
            ));
        }

        tracing::info!(operation = %operation.name, "Video generation job submitted");
        Ok(operation)
    }

    /// Refresh an operation handle.
    pub async fn poll_operation(&self, operation_name: &str) -> Result<VideoOperation, GenAiError> {
        let url = format!(
            "{}/{}?key={}",
            self.base_url,
            operation_name.trim_start_matches('/'),
            self.api_key
        );

        let response = self.http.get(&url).send().await?;
        let operation: VideoOperation = Self::parse_response(response).await?;

        tracing::debug!(
            operation = %operation.name,
            done = operation.done,
            "Refreshed video operation",
        );
        Ok(operation)
    }

    /// Fetch the media behind a result locator.
    ///
    /// The locator returned by the service is pre-signed except for the
    /// credential, which is appended as a query parameter.
    pub async fn fetch_media(&self, uri: &str) -> Result<FetchedMedia, GenAiError> {
        let separator = if uri.contains('?') { '&' } else { '?' };
        let url = format!("{uri}{separator}key={}", self.api_key);

        let response = self.http.get(&url).send().await?;
        let response = Self::ensure_success(response).await?;

        let media_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        Ok(FetchedMedia {
            bytes: response.bytes().await?,
            media_type,
        })
    }

    // ---- private helpers ----

    fn model_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, model, method, self.api_key
        )
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GenAiError::Api`] with the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GenAiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GenAiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
