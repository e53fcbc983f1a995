//! The video generation workflow: submit, poll to completion, download.
//!
//! One linear routine with two independent cadences: the decorative
//! status ticker (see [`crate::ticker`]) and the completion poll loop.
//! The two are never synchronized -- a status message may be delivered
//! while a refresh is in flight. Exactly one job handle exists per
//! invocation and it is never polled concurrently.

use reelsmith_core::asset::{AssetStore, ResultAsset};
use reelsmith_core::config::StudioConfig;
use reelsmith_core::progress;
use reelsmith_core::prompt;
use reelsmith_core::types::GenerationRequest;
use reelsmith_genai::client::GenAiError;
use reelsmith_genai::messages::VideoOperation;
use reelsmith_genai::GenerativeBackend;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::error::StudioError;
use crate::progress::ProgressSink;
use crate::ticker::StatusTicker;

/// Media types the transport encoding accepts for the source frame.
const TRANSPORT_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// Media type assumed for a downloaded clip when the server does not
/// declare one.
const FALLBACK_VIDEO_TYPE: &str = "video/mp4";

/// Run one video generation job from request to stored result.
///
/// The first status message is emitted before any suspension point, so
/// the caller can render "starting" state with zero latency. The status
/// ticker is stopped on every exit path before this function resolves.
pub(crate) async fn run<B: GenerativeBackend>(
    backend: &B,
    config: &StudioConfig,
    assets: &AssetStore,
    request: &GenerationRequest,
    on_progress: &ProgressSink,
    cancel: &CancellationToken,
) -> Result<ResultAsset, StudioError> {
    request
        .check()
        .map_err(|e| StudioError::InvalidInput(e.to_string()))?;

    if !TRANSPORT_IMAGE_TYPES.contains(&request.source.media_type()) {
        return Err(StudioError::Encoding(format!(
            "media type '{}' cannot be sent to the video model; use one of: {}",
            request.source.media_type(),
            TRANSPORT_IMAGE_TYPES.join(", ")
        )));
    }

    let full_prompt = prompt::build_video_prompt(&request.directive, &request.settings);

    // Observable before the first network suspension point.
    on_progress.emit(progress::message_at(0));

    let operation = backend
        .submit_video(&full_prompt, &request.source)
        .await
        .map_err(|e| StudioError::Submission(e.to_string()))?;

    tracing::info!(
        operation = %operation.name,
        duration_secs = request.settings.duration_secs,
        "Video job submitted",
    );

    let ticker = StatusTicker::start(on_progress.clone(), config.status_interval);
    let resolved = drive_to_completion(backend, config, cancel, operation).await;
    // The cadence stops before the outcome is reported, success or not.
    ticker.stop().await;
    let operation = resolved?;

    on_progress.emit(progress::COMPLETION_MESSAGE);

    let Some(uri) = operation.result_uri() else {
        return Err(StudioError::MissingResult);
    };

    let media = match backend.fetch_media(uri).await {
        Ok(media) => media,
        Err(GenAiError::Api { status, body }) => {
            return Err(StudioError::Download { status, body });
        }
        Err(other) => {
            return Err(StudioError::Unknown(format!(
                "result download failed: {other}"
            )));
        }
    };

    let media_type = media
        .media_type
        .unwrap_or_else(|| FALLBACK_VIDEO_TYPE.to_string());
    let asset = assets.insert(media.bytes, media_type);

    tracing::info!(
        asset_id = %asset.id,
        size_bytes = asset.size_bytes,
        "Video stored",
    );
    Ok(asset)
}

/// Poll the job handle until it reports `done`, honoring cancellation
/// and the wall-clock deadline.
///
/// The first refresh happens immediately after submission; subsequent
/// refreshes follow `poll_interval`. No refresh is issued once the
/// handle reports `done`.
async fn drive_to_completion<B: GenerativeBackend>(
    backend: &B,
    config: &StudioConfig,
    cancel: &CancellationToken,
    mut operation: VideoOperation,
) -> Result<VideoOperation, StudioError> {
    let deadline = tokio::time::Instant::now() + config.poll_deadline;
    let mut refresh = tokio::time::interval(config.poll_interval);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while !operation.done {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(operation = %operation.name, "Video job cancelled");
                return Err(StudioError::Cancelled);
            }
            _ = tokio::time::sleep_until(deadline) => {
                tracing::warn!(
                    operation = %operation.name,
                    deadline_secs = config.poll_deadline.as_secs(),
                    "Video job timed out",
                );
                return Err(StudioError::Timeout {
                    limit: config.poll_deadline,
                });
            }
            _ = refresh.tick() => {
                operation = backend
                    .poll_video(&operation.name)
                    .await
                    .map_err(|e| StudioError::Unknown(format!("status poll failed: {e}")))?;
            }
        }
    }

    match operation.error.take() {
        Some(error) => Err(StudioError::Remote {
            code: error.code,
            message: error.message,
        }),
        None => Ok(operation),
    }
}
