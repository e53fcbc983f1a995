//! Caller-facing request types and shared aliases.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::prompt;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ---------------------------------------------------------------------------
// Aspect ratio
// ---------------------------------------------------------------------------

/// Output shapes accepted by the image generation endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "9:16")]
    Vertical,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "3:4")]
    Portrait,
}

impl AspectRatio {
    /// The wire representation, e.g. `"16:9"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Widescreen => "16:9",
            Self::Vertical => "9:16",
            Self::Landscape => "4:3",
            Self::Portrait => "3:4",
        }
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1:1" => Ok(Self::Square),
            "16:9" => Ok(Self::Widescreen),
            "9:16" => Ok(Self::Vertical),
            "4:3" => Ok(Self::Landscape),
            "3:4" => Ok(Self::Portrait),
            other => Err(CoreError::Validation(format!(
                "Unknown aspect ratio: '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Source image
// ---------------------------------------------------------------------------

/// A still image uploaded by the caller, used as the first frame seed
/// for video synthesis.
///
/// Constructed through [`SourceImage::new`], which rejects empty payloads
/// and non-image media types, so a value of this type is always sendable.
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Bytes,
    media_type: String,
}

impl SourceImage {
    /// Wrap raw image bytes with their declared media type.
    ///
    /// The payload must be non-empty and the media type must be an
    /// `image/*` type (e.g. `image/png`).
    pub fn new(bytes: impl Into<Bytes>, media_type: impl Into<String>) -> Result<Self, CoreError> {
        let bytes = bytes.into();
        let media_type = media_type.into();

        if bytes.is_empty() {
            return Err(CoreError::Validation(
                "Source image must not be empty".to_string(),
            ));
        }
        if !media_type.starts_with("image/") {
            return Err(CoreError::Validation(format!(
                "Source media type must be an image type, got: '{media_type}'"
            )));
        }

        Ok(Self { bytes, media_type })
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Declared media type, e.g. `image/png`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }
}

// ---------------------------------------------------------------------------
// Video settings
// ---------------------------------------------------------------------------

/// Valid clip lengths in seconds.
pub const VALID_DURATIONS_SECS: &[u32] = &[5, 10];

/// The only supported output resolution.
pub const RESOLUTION_1080P: &str = "1080p";

/// Stylistic modifiers folded into the directive text before submission.
///
/// These mirror the studio's preset pickers: none of them reach the wire
/// as structured parameters; they only shape the prompt (see
/// [`prompt::build_video_prompt`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSettings {
    /// Requested clip length in seconds (5 or 10).
    pub duration_secs: u32,
    /// Output resolution; currently fixed to `1080p`.
    pub resolution: String,
    /// Whether the provider watermark should be removed.
    pub remove_watermark: bool,
    /// Optional motion-actor preset the clip should feature.
    pub motion_actor: Option<String>,
    /// Optional visual-effect style preset.
    pub effect_style: Option<String>,
    /// Optional audio-track mood the clip should fit.
    pub audio_track: Option<String>,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            duration_secs: 5,
            resolution: RESOLUTION_1080P.to_string(),
            remove_watermark: false,
            motion_actor: None,
            effect_style: Some("Uplifting".to_string()),
            audio_track: None,
        }
    }
}

impl VideoSettings {
    /// Validate duration and resolution against the supported sets.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !VALID_DURATIONS_SECS.contains(&self.duration_secs) {
            return Err(CoreError::Validation(format!(
                "Invalid duration: {}s. Must be one of: {:?}",
                self.duration_secs, VALID_DURATIONS_SECS
            )));
        }
        if self.resolution != RESOLUTION_1080P {
            return Err(CoreError::Validation(format!(
                "Unsupported resolution: '{}'",
                self.resolution
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Generation request
// ---------------------------------------------------------------------------

/// A video generation request: source frame, directive, and modifiers.
///
/// Immutable once handed to the orchestrator. [`check`](Self::check) runs
/// the full validation set; the orchestrator refuses invalid requests
/// before touching the network.
#[derive(Debug, Clone, Validate)]
pub struct GenerationRequest {
    /// Free-text description of the desired scene and motion.
    #[validate(length(min = 1, max = 2000))]
    pub directive: String,
    /// The still image seeding the clip.
    pub source: SourceImage,
    /// Stylistic modifiers folded into the directive.
    pub settings: VideoSettings,
}

impl GenerationRequest {
    /// Build a request with default [`VideoSettings`].
    pub fn new(source: SourceImage, directive: impl Into<String>) -> Self {
        Self {
            directive: directive.into(),
            source,
            settings: VideoSettings::default(),
        }
    }

    /// Replace the default settings.
    pub fn with_settings(mut self, settings: VideoSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Run the full validation set: derive bounds, whitespace-only
    /// directive rejection, and settings checks.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        prompt::validate_directive(&self.directive)?;
        self.settings.validate()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
