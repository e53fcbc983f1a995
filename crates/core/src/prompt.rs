//! Directive validation and prompt construction.
//!
//! The studio never sends structured style parameters to the remote
//! service: presets and clip options are folded into the directive text
//! here, and the prompt-enhancement operation wraps the directive in an
//! instruction template before sending it to the text model.

use crate::error::CoreError;
use crate::types::VideoSettings;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Practical upper bound on directive length, in characters.
pub const MAX_DIRECTIVE_LEN: usize = 2000;

/// Directives longer than this are assumed to be destined for a
/// still-image model rather than a video model when enhancing.
pub const ENHANCEMENT_TARGET_SWITCH_LEN: usize = 500;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a directive is non-empty (after trimming) and within
/// the practical length bound.
pub fn validate_directive(directive: &str) -> Result<(), CoreError> {
    if directive.trim().is_empty() {
        return Err(CoreError::Validation(
            "Directive must not be empty".to_string(),
        ));
    }
    if directive.chars().count() > MAX_DIRECTIVE_LEN {
        return Err(CoreError::Validation(format!(
            "Directive exceeds {MAX_DIRECTIVE_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Video prompt folding
// ---------------------------------------------------------------------------

/// Fold [`VideoSettings`] modifiers into the directive text.
///
/// Clause order is fixed: effect style, motion actor, audio mood, then
/// the duration sentence (always present).
pub fn build_video_prompt(directive: &str, settings: &VideoSettings) -> String {
    let mut full = directive.to_string();

    if let Some(ref style) = settings.effect_style {
        full.push_str(&format!(" with a style of {style}"));
    }
    if let Some(ref actor) = settings.motion_actor {
        full.push_str(&format!(", featuring a character resembling {actor}"));
    }
    if let Some(ref track) = settings.audio_track {
        full.push_str(&format!(
            ". The video should have a mood that fits {track} music."
        ));
    }
    full.push_str(&format!(
        " The video should be {} seconds long.",
        settings.duration_secs
    ));

    full
}

// ---------------------------------------------------------------------------
// Enhancement meta-prompt
// ---------------------------------------------------------------------------

/// Which generative model the enhanced directive is intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancementTarget {
    TextToImage,
    TextToVideo,
}

impl EnhancementTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextToImage => "text-to-image",
            Self::TextToVideo => "text-to-video",
        }
    }
}

/// Pick the enhancement target from the directive length.
///
/// Long directives (over [`ENHANCEMENT_TARGET_SWITCH_LEN`] characters)
/// are treated as still-image prompts.
pub fn enhancement_target(directive: &str) -> EnhancementTarget {
    if directive.chars().count() > ENHANCEMENT_TARGET_SWITCH_LEN {
        EnhancementTarget::TextToImage
    } else {
        EnhancementTarget::TextToVideo
    }
}

/// Wrap a user directive in the prompt-engineering instruction sent to
/// the text model.
///
/// The instruction demands that the model return only the rewritten
/// prompt, with no surrounding commentary, so the response body can be
/// used verbatim.
pub fn build_enhancement_prompt(directive: &str) -> String {
    let target = enhancement_target(directive);
    format!(
        "You are an expert prompt engineer for a generative AI model. \
         Your task is to take a user's simple prompt and expand it into a rich, \
         cinematic, and descriptive prompt that will generate a beautiful and \
         engaging result.\n\
         - Focus on visual details: describe the scene, lighting, colors, camera \
         angles (e.g., wide shot, close-up, dolly zoom), and motion if for video.\n\
         - Evoke a mood or atmosphere.\n\
         - Mention artistic styles (e.g., photorealistic, impressionistic, futuristic).\n\
         - For a {} model.\n\
         - Keep it concise but powerful.\n\
         - Return ONLY the improved prompt text, without any introductory phrases \
         like \"Here's the improved prompt:\" or any other surrounding text.\n\n\
         Original user prompt: \"{}\"",
        target.as_str(),
        directive
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
