//! REST client for the remote generative-media service.
//!
//! Three logical capabilities are consumed: text enhancement (single
//! round trip), image synthesis (single round trip), and video synthesis
//! (a long-running operation that must be polled to completion and whose
//! result is fetched from a signed locator URI).
//!
//! [`GenAiClient`] is the production implementation; the orchestrator
//! depends only on the [`GenerativeBackend`] trait so tests can inject
//! scripted fakes with fake credentials.

pub mod backend;
pub mod client;
pub mod messages;

pub use backend::GenerativeBackend;
pub use client::{FetchedMedia, GenAiClient, GenAiError, GeneratedImage};
pub use messages::VideoOperation;
