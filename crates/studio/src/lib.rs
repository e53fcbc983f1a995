//! Caller-facing orchestration for the reelsmith studio.
//!
//! Three asynchronous entry points back the studio's UI: prompt
//! enhancement ([`Studio::improve`]), still-image synthesis
//! ([`Studio::generate_image`]), and the video workflow
//! ([`Studio::generate_video`]), which submits a long-running remote
//! job, polls it to completion, streams decorative status messages to
//! the caller, and materializes the downloaded clip in the local
//! [`AssetStore`].
//!
//! At most one video job should be in flight per workflow: start a new
//! request only after the previous one has resolved.

pub mod error;
pub mod progress;
mod ticker;
mod video;

use std::sync::Arc;

use reelsmith_core::asset::{AssetStore, ResultAsset};
use reelsmith_core::config::StudioConfig;
use reelsmith_core::prompt;
use reelsmith_core::types::{AspectRatio, GenerationRequest};
use reelsmith_genai::GenerativeBackend;
use tokio_util::sync::CancellationToken;

pub use error::StudioError;
pub use progress::ProgressSink;

/// The studio's orchestration facade.
///
/// Generic over the remote backend so tests can substitute scripted
/// fakes; production code instantiates it with
/// [`GenAiClient`](reelsmith_genai::GenAiClient).
pub struct Studio<B: GenerativeBackend> {
    backend: Arc<B>,
    config: StudioConfig,
    assets: AssetStore,
}

impl<B: GenerativeBackend> Studio<B> {
    /// Build a studio around a validated configuration and a backend.
    pub fn new(config: StudioConfig, backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            config,
            assets: AssetStore::new(),
        }
    }

    /// The store holding finished results.
    ///
    /// Handles returned by the generation methods stay resident until
    /// [`AssetStore::release`] is called; release superseded results.
    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Rewrite a directive into a richer, more cinematic prompt.
    ///
    /// An empty or whitespace-only directive returns an empty string
    /// immediately, without a remote call.
    pub async fn improve(&self, directive: &str) -> Result<String, StudioError> {
        if directive.trim().is_empty() {
            return Ok(String::new());
        }

        let meta_prompt = prompt::build_enhancement_prompt(directive);
        let improved = self
            .backend
            .enhance_text(&meta_prompt)
            .await
            .map_err(|e| StudioError::Enhancement(e.to_string()))?;

        tracing::debug!(
            original_len = directive.len(),
            improved_len = improved.len(),
            "Directive enhanced",
        );
        Ok(improved.trim().to_string())
    }

    /// Synthesize a single still image for a directive.
    pub async fn generate_image(
        &self,
        directive: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<ResultAsset, StudioError> {
        prompt::validate_directive(directive)
            .map_err(|e| StudioError::InvalidInput(e.to_string()))?;

        let mut images = self
            .backend
            .generate_images(directive, aspect_ratio, 1)
            .await
            .map_err(|e| StudioError::ImageGeneration(e.to_string()))?;

        if images.is_empty() {
            return Err(StudioError::ImageGeneration(
                "generation succeeded but returned no images".to_string(),
            ));
        }
        let image = images.swap_remove(0);

        let asset = self.assets.insert(image.bytes, image.media_type);
        tracing::info!(
            asset_id = %asset.id,
            aspect_ratio = %aspect_ratio,
            "Image stored",
        );
        Ok(asset)
    }

    /// Run the full video workflow for one request.
    ///
    /// Status messages are pushed through `on_progress` on a fixed
    /// cadence while the remote job runs; triggering `cancel` stops the
    /// workflow at the next suspension point with
    /// [`StudioError::Cancelled`]. On success the returned handle
    /// addresses the downloaded clip in [`Studio::assets`].
    pub async fn generate_video(
        &self,
        request: GenerationRequest,
        on_progress: ProgressSink,
        cancel: CancellationToken,
    ) -> Result<ResultAsset, StudioError> {
        video::run(
            self.backend.as_ref(),
            &self.config,
            &self.assets,
            &request,
            &on_progress,
            &cancel,
        )
        .await
    }
}
