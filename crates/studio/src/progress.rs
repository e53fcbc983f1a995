//! Push-based progress reporting.

use std::fmt;
use std::sync::Arc;

/// Cloneable sink for human-readable status messages.
///
/// Wraps the caller's callback so the orchestrator and the status ticker
/// can share it across tasks. Emission is synchronous; callbacks should
/// be cheap (store the string, notify a UI) and must not block.
#[derive(Clone)]
pub struct ProgressSink {
    callback: Arc<dyn Fn(&str) + Send + Sync>,
}

impl ProgressSink {
    /// Wrap a callback.
    pub fn new(callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// A sink that discards every message.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    /// Deliver one status message to the caller.
    pub fn emit(&self, message: &str) {
        tracing::debug!(message, "Status update");
        (self.callback)(message);
    }
}

impl fmt::Debug for ProgressSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressSink").finish_non_exhaustive()
    }
}
