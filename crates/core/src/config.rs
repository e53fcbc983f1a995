//! Studio configuration loaded from environment variables.
//!
//! The remote-service credential is validated once at startup and then
//! injected explicitly into the client and orchestrator constructors.
//! Nothing in the workspace reads the environment after
//! [`StudioConfig::from_env`] returns.

use std::time::Duration;

use crate::error::ConfigError;
use crate::progress::{COMPLETION_POLL_INTERVAL, DEFAULT_POLL_DEADLINE, STATUS_MESSAGE_INTERVAL};

// ---------------------------------------------------------------------------
// Environment variable names
// ---------------------------------------------------------------------------

/// Required bearer credential for the remote generative service.
pub const ENV_API_KEY: &str = "REELSMITH_API_KEY";
/// Base URL of the remote generative service.
pub const ENV_BASE_URL: &str = "REELSMITH_BASE_URL";
/// Per-request HTTP timeout in seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "REELSMITH_HTTP_TIMEOUT_SECS";
/// Decorative status-message cadence in seconds.
pub const ENV_STATUS_INTERVAL_SECS: &str = "REELSMITH_STATUS_INTERVAL_SECS";
/// Job polling cadence in seconds.
pub const ENV_POLL_INTERVAL_SECS: &str = "REELSMITH_POLL_INTERVAL_SECS";
/// Polling deadline in seconds.
pub const ENV_POLL_DEADLINE_SECS: &str = "REELSMITH_POLL_DEADLINE_SECS";

/// Default remote service base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default per-request HTTP timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(120);

// ---------------------------------------------------------------------------
// StudioConfig
// ---------------------------------------------------------------------------

/// Runtime configuration for the studio.
///
/// All fields except the credential have defaults suitable for
/// production use; tests construct the struct directly with shortened
/// cadences and fake credentials.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Bearer credential for the remote generative service.
    pub api_key: String,
    /// Remote service base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
    /// Decorative status-message cadence.
    pub status_interval: Duration,
    /// Job polling cadence.
    pub poll_interval: Duration,
    /// Wall-clock ceiling on the polling loop.
    pub poll_deadline: Duration,
}

impl StudioConfig {
    /// Build a configuration with defaults around an explicit credential.
    ///
    /// Fails with [`ConfigError::MissingApiKey`] if the credential is
    /// empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey(ENV_API_KEY));
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            status_interval: STATUS_MESSAGE_INTERVAL,
            poll_interval: COMPLETION_POLL_INTERVAL,
            poll_deadline: DEFAULT_POLL_DEADLINE,
        })
    }

    /// Load configuration from environment variables (a `.env` file is
    /// honored when present).
    ///
    /// | Env var                          | Default                                             |
    /// |----------------------------------|-----------------------------------------------------|
    /// | `REELSMITH_API_KEY`              | (required)                                          |
    /// | `REELSMITH_BASE_URL`             | `https://generativelanguage.googleapis.com/v1beta`  |
    /// | `REELSMITH_HTTP_TIMEOUT_SECS`    | `120`                                               |
    /// | `REELSMITH_STATUS_INTERVAL_SECS` | `7`                                                 |
    /// | `REELSMITH_POLL_INTERVAL_SECS`   | `10`                                                |
    /// | `REELSMITH_POLL_DEADLINE_SECS`   | `600`                                               |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_key =
            std::env::var(ENV_API_KEY).map_err(|_| ConfigError::MissingApiKey(ENV_API_KEY))?;
        let mut config = Self::new(api_key)?;

        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(raw) = std::env::var(ENV_HTTP_TIMEOUT_SECS) {
            config.http_timeout = parse_secs(ENV_HTTP_TIMEOUT_SECS, &raw)?;
        }
        if let Ok(raw) = std::env::var(ENV_STATUS_INTERVAL_SECS) {
            config.status_interval = parse_secs(ENV_STATUS_INTERVAL_SECS, &raw)?;
        }
        if let Ok(raw) = std::env::var(ENV_POLL_INTERVAL_SECS) {
            config.poll_interval = parse_secs(ENV_POLL_INTERVAL_SECS, &raw)?;
        }
        if let Ok(raw) = std::env::var(ENV_POLL_DEADLINE_SECS) {
            config.poll_deadline = parse_secs(ENV_POLL_DEADLINE_SECS, &raw)?;
        }

        Ok(config)
    }
}

/// Parse a positive number of seconds from an environment value.
fn parse_secs(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
