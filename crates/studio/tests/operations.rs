//! Tests for the single-round-trip operations: prompt enhancement and
//! still-image synthesis.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use async_trait::async_trait;
use bytes::Bytes;

use reelsmith_core::config::StudioConfig;
use reelsmith_core::types::{AspectRatio, SourceImage};
use reelsmith_genai::client::{FetchedMedia, GenAiError, GeneratedImage};
use reelsmith_genai::messages::VideoOperation;
use reelsmith_genai::GenerativeBackend;
use reelsmith_studio::{Studio, StudioError};

// ---------------------------------------------------------------------------
// Counting backend
// ---------------------------------------------------------------------------

#[derive(Default)]
struct CountingBackend {
    enhance_calls: AtomicUsize,
    image_calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
    enhance_reply: Option<String>,
    fail_enhance: bool,
    images: Vec<(&'static [u8], &'static str)>,
    fail_images: bool,
}

#[async_trait]
impl GenerativeBackend for CountingBackend {
    async fn enhance_text(&self, prompt: &str) -> Result<String, GenAiError> {
        self.enhance_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if self.fail_enhance {
            return Err(GenAiError::Api {
                status: 503,
                body: "model overloaded".to_string(),
            });
        }
        Ok(self.enhance_reply.clone().unwrap_or_default())
    }

    async fn generate_images(
        &self,
        prompt: &str,
        _aspect_ratio: AspectRatio,
        _count: u32,
    ) -> Result<Vec<GeneratedImage>, GenAiError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if self.fail_images {
            return Err(GenAiError::Api {
                status: 500,
                body: "synthesis failed".to_string(),
            });
        }
        Ok(self
            .images
            .iter()
            .map(|(bytes, media_type)| GeneratedImage {
                bytes: Bytes::from_static(bytes),
                media_type: media_type.to_string(),
            })
            .collect())
    }

    async fn submit_video(
        &self,
        _prompt: &str,
        _image: &SourceImage,
    ) -> Result<VideoOperation, GenAiError> {
        panic!("submit_video is not part of these tests");
    }

    async fn poll_video(&self, _operation_name: &str) -> Result<VideoOperation, GenAiError> {
        panic!("poll_video is not part of these tests");
    }

    async fn fetch_media(&self, _uri: &str) -> Result<FetchedMedia, GenAiError> {
        panic!("fetch_media is not part of these tests");
    }
}

fn studio_with(backend: CountingBackend) -> (Studio<ArcBackend>, Arc<CountingBackend>) {
    let backend = Arc::new(backend);
    let config = StudioConfig::new("fake-key").unwrap();
    (Studio::new(config, ArcBackend(backend.clone())), backend)
}

/// Thin forwarding wrapper so the test can keep a handle on the counters
/// after the studio takes ownership of the backend.
struct ArcBackend(Arc<CountingBackend>);

#[async_trait]
impl GenerativeBackend for ArcBackend {
    async fn enhance_text(&self, prompt: &str) -> Result<String, GenAiError> {
        self.0.enhance_text(prompt).await
    }

    async fn generate_images(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
        count: u32,
    ) -> Result<Vec<GeneratedImage>, GenAiError> {
        self.0.generate_images(prompt, aspect_ratio, count).await
    }

    async fn submit_video(
        &self,
        prompt: &str,
        image: &SourceImage,
    ) -> Result<VideoOperation, GenAiError> {
        self.0.submit_video(prompt, image).await
    }

    async fn poll_video(&self, operation_name: &str) -> Result<VideoOperation, GenAiError> {
        self.0.poll_video(operation_name).await
    }

    async fn fetch_media(&self, uri: &str) -> Result<FetchedMedia, GenAiError> {
        self.0.fetch_media(uri).await
    }
}

// ---------------------------------------------------------------------------
// improve
// ---------------------------------------------------------------------------

#[tokio::test]
async fn improve_short_circuits_on_empty_directive() {
    let (studio, counters) = studio_with(CountingBackend::default());

    assert_eq!(studio.improve("").await.unwrap(), "");
    assert_eq!(studio.improve("   \t\n ").await.unwrap(), "");
    assert_eq!(counters.enhance_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn improve_wraps_directive_in_the_instruction_template() {
    let (studio, counters) = studio_with(CountingBackend {
        enhance_reply: Some("  A cinematic fox, golden hour.  ".to_string()),
        ..Default::default()
    });

    let improved = studio.improve("a fox").await.unwrap();
    assert_eq!(improved, "A cinematic fox, golden hour.");
    assert_eq!(counters.enhance_calls.load(Ordering::SeqCst), 1);

    let sent = counters.last_prompt.lock().unwrap().clone().unwrap();
    assert!(sent.contains("\"a fox\""));
    assert!(sent.contains("text-to-video model"));
}

#[tokio::test]
async fn improve_maps_backend_failure_to_enhancement_error() {
    let (studio, _) = studio_with(CountingBackend {
        fail_enhance: true,
        ..Default::default()
    });

    assert_matches!(
        studio.improve("a fox").await,
        Err(StudioError::Enhancement(_))
    );
}

// ---------------------------------------------------------------------------
// generate_image
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_image_stores_the_first_result() {
    let (studio, counters) = studio_with(CountingBackend {
        images: vec![(&b"jpeg-bytes"[..], "image/jpeg")],
        ..Default::default()
    });

    let asset = studio
        .generate_image("a red balloon", AspectRatio::Widescreen)
        .await
        .unwrap();

    assert_eq!(asset.media_type, "image/jpeg");
    assert_eq!(
        studio.assets().bytes(&asset.id).unwrap().as_ref(),
        b"jpeg-bytes"
    );
    assert_eq!(counters.image_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn generate_image_with_zero_results_is_an_error() {
    let (studio, _) = studio_with(CountingBackend::default());

    let err = studio
        .generate_image("a red balloon", AspectRatio::Square)
        .await
        .unwrap_err();

    assert_matches!(err, StudioError::ImageGeneration(_));
    assert!(studio.assets().is_empty());
}

#[tokio::test]
async fn generate_image_maps_backend_failure() {
    let (studio, _) = studio_with(CountingBackend {
        fail_images: true,
        ..Default::default()
    });

    assert_matches!(
        studio.generate_image("a red balloon", AspectRatio::Square).await,
        Err(StudioError::ImageGeneration(_))
    );
}

#[tokio::test]
async fn generate_image_rejects_empty_directive_without_a_call() {
    let (studio, counters) = studio_with(CountingBackend::default());

    assert_matches!(
        studio.generate_image("  ", AspectRatio::Square).await,
        Err(StudioError::InvalidInput(_))
    );
    assert_eq!(counters.image_calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// asset lifecycle through the studio surface
// ---------------------------------------------------------------------------

#[tokio::test]
async fn superseded_assets_can_be_released() {
    let (studio, _) = studio_with(CountingBackend {
        images: vec![(&b"jpeg-bytes"[..], "image/jpeg")],
        ..Default::default()
    });

    let first = studio
        .generate_image("take one", AspectRatio::Square)
        .await
        .unwrap();
    let second = studio
        .generate_image("take two", AspectRatio::Square)
        .await
        .unwrap();
    assert_eq!(studio.assets().len(), 2);

    // The caller replaces the first result and releases it.
    assert!(studio.assets().release(&first.id));
    assert!(!studio.assets().release(&first.id));
    assert_eq!(studio.assets().len(), 1);
    assert!(studio.assets().bytes(&second.id).is_some());
}
