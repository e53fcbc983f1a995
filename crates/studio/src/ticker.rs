//! The decorative status-message cadence.
//!
//! While a video job is polled, a background task advances through the
//! cyclic message catalogue on a fixed interval and pushes each message
//! into the caller's [`ProgressSink`]. The cadence is cosmetic: it runs
//! independently of the poll loop and carries no real job telemetry.

use std::time::Duration;

use reelsmith_core::progress;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::progress::ProgressSink;

/// Handle to the running status-message task.
///
/// The cadence is a scoped resource: dropping the handle cancels the
/// task, so an early return or panic in the orchestrator can never leave
/// the timer running after the job has resolved.
pub(crate) struct StatusTicker {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl StatusTicker {
    /// Spawn the cadence.
    ///
    /// The first catalogue entry is emitted synchronously by the
    /// orchestrator before submission; the ticker continues from index 1
    /// after one full interval has elapsed.
    pub(crate) fn start(sink: ProgressSink, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let first = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(first, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let mut index = 1usize;
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if token.is_cancelled() {
                            break;
                        }
                        sink.emit(progress::message_at(index));
                        index += 1;
                    }
                }
            }
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Stop the cadence and wait for the task to finish.
    ///
    /// After this returns, no further message will be emitted.
    pub(crate) async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for StatusTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_sink() -> (ProgressSink, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = seen.clone();
            ProgressSink::new(move |msg| seen.lock().unwrap().push(msg.to_string()))
        };
        (sink, seen)
    }

    async fn advance_by_intervals(interval: Duration, count: usize) {
        for _ in 0..count {
            tokio::time::advance(interval).await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn emits_one_message_per_interval() {
        let interval = Duration::from_secs(7);
        let (sink, seen) = recording_sink();
        let ticker = StatusTicker::start(sink, interval);
        tokio::task::yield_now().await;

        advance_by_intervals(interval, 3).await;
        ticker.stop().await;

        let messages = seen.lock().unwrap().clone();
        assert_eq!(
            messages,
            vec![
                progress::LOADING_MESSAGES[1],
                progress::LOADING_MESSAGES[2],
                progress::LOADING_MESSAGES[3],
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cycles_through_the_catalogue_with_wraparound() {
        let interval = Duration::from_secs(7);
        let catalogue_len = progress::LOADING_MESSAGES.len();
        let (sink, seen) = recording_sink();
        let ticker = StatusTicker::start(sink, interval);
        tokio::task::yield_now().await;

        // One full cycle plus two: indices 1..=len+2 wrap past the end.
        advance_by_intervals(interval, catalogue_len + 2).await;
        ticker.stop().await;

        let messages = seen.lock().unwrap().clone();
        assert_eq!(messages.len(), catalogue_len + 2);
        assert_eq!(messages[catalogue_len - 1], progress::LOADING_MESSAGES[0]);
        assert_eq!(messages[catalogue_len], progress::LOADING_MESSAGES[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn no_message_fires_after_stop() {
        let interval = Duration::from_secs(7);
        let (sink, seen) = recording_sink();
        let ticker = StatusTicker::start(sink, interval);
        tokio::task::yield_now().await;

        advance_by_intervals(interval, 2).await;
        ticker.stop().await;

        advance_by_intervals(interval, 10).await;
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_before_the_first_interval() {
        let interval = Duration::from_secs(7);
        let (sink, seen) = recording_sink();
        let ticker = StatusTicker::start(sink, interval);
        tokio::task::yield_now().await;

        tokio::time::advance(interval - Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert!(seen.lock().unwrap().is_empty());

        ticker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_cadence() {
        let interval = Duration::from_secs(7);
        let (sink, seen) = recording_sink();
        let ticker = StatusTicker::start(sink, interval);
        tokio::task::yield_now().await;

        advance_by_intervals(interval, 1).await;
        drop(ticker);
        tokio::task::yield_now().await;

        advance_by_intervals(interval, 5).await;
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
