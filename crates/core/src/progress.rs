//! The status-message catalogue and cadence constants.
//!
//! Status messages are decorative: they advance on a fixed timer and are
//! never derived from real remote progress. The catalogue is cyclic, so
//! long-running jobs wrap around to the first message again.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// Ordered, cyclic status messages shown while a video job runs.
pub const LOADING_MESSAGES: &[&str] = &[
    "Warming up the AI generators...",
    "Analyzing the source image for cinematic potential...",
    "Composing the initial scene and lighting...",
    "Storyboarding the motion and camera angles...",
    "Rendering high-fidelity frames...",
    "Applying advanced cinematic effects and color grading...",
    "Synchronizing audio and visual elements...",
    "Finalizing the video render, adding finishing touches...",
];

/// Message emitted once the job resolves successfully.
pub const COMPLETION_MESSAGE: &str = "Video generated successfully!";

// ---------------------------------------------------------------------------
// Cadences
// ---------------------------------------------------------------------------

/// How often the decorative status message advances.
pub const STATUS_MESSAGE_INTERVAL: Duration = Duration::from_secs(7);

/// How often the remote job handle is refreshed.
pub const COMPLETION_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Wall-clock ceiling on the polling loop before giving up.
pub const DEFAULT_POLL_DEADLINE: Duration = Duration::from_secs(600);

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Fetch the status message for a tick index, wrapping around the
/// catalogue.
pub fn message_at(index: usize) -> &'static str {
    LOADING_MESSAGES[index % LOADING_MESSAGES.len()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
