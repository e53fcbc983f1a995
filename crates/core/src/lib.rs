//! Shared domain types for the reelsmith generative-media studio.
//!
//! This crate has no internal dependencies so that the service client,
//! the orchestrator, and any future worker or CLI tooling can all build
//! on the same vocabulary: request/result types, the status-message
//! catalogue, configuration, and the local asset store.

pub mod asset;
pub mod config;
pub mod error;
pub mod progress;
pub mod prompt;
pub mod types;

pub use error::{ConfigError, CoreError};
