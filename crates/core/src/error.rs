use thiserror::Error;

/// Errors produced by the pure domain layer.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Errors raised while loading [`StudioConfig`](crate::config::StudioConfig).
///
/// A missing credential is a fatal startup condition: the process must
/// refuse to come up rather than fail on the first remote call.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The required API credential environment variable is not set.
    #[error("{0} environment variable is not set")]
    MissingApiKey(&'static str),

    /// An optional environment variable is set but cannot be parsed.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}
