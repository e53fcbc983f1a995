use std::time::Duration;

use thiserror::Error;

/// Terminal outcomes of the studio's entry points.
///
/// Every failure inside an operation is normalized into exactly one of
/// these variants with a human-readable message; no partial result is
/// ever exposed alongside an error. There is no automatic retry at this
/// layer -- the caller displays the message and resets its own state.
#[derive(Debug, Error)]
pub enum StudioError {
    /// The request failed validation before any remote call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The source asset could not be encoded into transport form.
    #[error("Could not encode the source image: {0}")]
    Encoding(String),

    /// Remote job creation failed or returned a malformed handle.
    #[error("Failed to start video generation: {0}")]
    Submission(String),

    /// The prompt-enhancement round trip failed.
    #[error("Could not improve the prompt: {0}")]
    Enhancement(String),

    /// The image synthesis round trip failed or produced nothing.
    #[error("Failed to generate image: {0}")]
    ImageGeneration(String),

    /// The job finished, but the remote service reported an error.
    #[error("Video generation failed remotely (code {code}): {message}")]
    Remote { code: i32, message: String },

    /// The job finished without a result locator.
    #[error("Video generation completed, but no download link was found")]
    MissingResult,

    /// The result fetch returned a non-success transport status.
    #[error("Failed to download the generated video (HTTP {status}): {body}")]
    Download { status: u16, body: String },

    /// The polling loop hit its wall-clock deadline.
    #[error("Video generation did not complete within {limit:?}")]
    Timeout { limit: Duration },

    /// The caller's cancellation token was triggered.
    #[error("Video generation was cancelled")]
    Cancelled,

    /// Catch-all for transport and other unexpected failures.
    #[error("An unexpected error occurred: {0}")]
    Unknown(String),
}
