//! Trait seam between the orchestrator and the remote service.
//!
//! The orchestrator is generic over [`GenerativeBackend`] so its timing
//! and error behavior can be tested against scripted fakes without a
//! network or a real credential.

use async_trait::async_trait;
use reelsmith_core::types::{AspectRatio, SourceImage};

use crate::client::{FetchedMedia, GenAiClient, GenAiError, GeneratedImage};
use crate::messages::VideoOperation;

/// The remote generative service, reduced to the five calls the studio
/// consumes.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Rewrite a prompt via the text model.
    async fn enhance_text(&self, prompt: &str) -> Result<String, GenAiError>;

    /// Synthesize still images for a prompt.
    async fn generate_images(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
        count: u32,
    ) -> Result<Vec<GeneratedImage>, GenAiError>;

    /// Start a video generation job, returning the initial handle.
    async fn submit_video(
        &self,
        prompt: &str,
        image: &SourceImage,
    ) -> Result<VideoOperation, GenAiError>;

    /// Refresh a job handle.
    async fn poll_video(&self, operation_name: &str) -> Result<VideoOperation, GenAiError>;

    /// Fetch the media behind a result locator.
    async fn fetch_media(&self, uri: &str) -> Result<FetchedMedia, GenAiError>;
}

#[async_trait]
impl GenerativeBackend for GenAiClient {
    async fn enhance_text(&self, prompt: &str) -> Result<String, GenAiError> {
        GenAiClient::enhance_text(self, prompt).await
    }

    async fn generate_images(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
        count: u32,
    ) -> Result<Vec<GeneratedImage>, GenAiError> {
        GenAiClient::generate_images(self, prompt, aspect_ratio, count).await
    }

    async fn submit_video(
        &self,
        prompt: &str,
        image: &SourceImage,
    ) -> Result<VideoOperation, GenAiError> {
        GenAiClient::submit_video(self, prompt, image).await
    }

    async fn poll_video(&self, operation_name: &str) -> Result<VideoOperation, GenAiError> {
        GenAiClient::poll_operation(self, operation_name).await
    }

    async fn fetch_media(&self, uri: &str) -> Result<FetchedMedia, GenAiError> {
        GenAiClient::fetch_media(self, uri).await
    }
}
