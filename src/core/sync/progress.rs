//! Progress reporting seam
//!
//! The engine reports two fractions per batch: a coarse batch fraction
//! (completed batches over total, monotonic across the run) and a fine
//! item fraction (completed downloads over batch size, restarting at zero
//! when a new batch begins). Status text names the stage currently running.
//! The engine only consumes this trait; hosts decide how to render it.

/// Sink for progress updates emitted during a sync run
pub trait ProgressSink: Send + Sync {
    /// Coarse progress: fraction of batches completed, in `0.0..=1.0`
    fn batch_progress(&self, fraction: f64);

    /// Fine progress: fraction of the current batch's downloads completed
    fn item_progress(&self, fraction: f64);

    /// Human-readable description of the stage currently running
    fn status(&self, text: &str);
}

/// Sink that discards every update
///
/// Default for hosts that don't render progress, and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn batch_progress(&self, _fraction: f64) {}

    fn item_progress(&self, _fraction: f64) {}

    fn status(&self, _text: &str) {}
}

/// Sink that forwards updates to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl LogProgress {
    /// Create a new logging sink
    pub fn new() -> Self {
        Self
    }
}

impl ProgressSink for LogProgress {
    fn batch_progress(&self, fraction: f64) {
        tracing::debug!(percent = format!("{:.0}%", fraction * 100.0), "Batch progress");
    }

    fn item_progress(&self, fraction: f64) {
        tracing::trace!(percent = format!("{:.0}%", fraction * 100.0), "Item progress");
    }

    fn status(&self, text: &str) {
        tracing::info!(status = %text, "Sync status");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every update for assertions
    #[derive(Debug, Default)]
    struct RecordingSink {
        batch: Mutex<Vec<f64>>,
        items: Mutex<Vec<f64>>,
        statuses: Mutex<Vec<String>>,
    }

    impl ProgressSink for RecordingSink {
        fn batch_progress(&self, fraction: f64) {
            self.batch.lock().unwrap().push(fraction);
        }

        fn item_progress(&self, fraction: f64) {
            self.items.lock().unwrap().push(fraction);
        }

        fn status(&self, text: &str) {
            self.statuses.lock().unwrap().push(text.to_string());
        }
    }

    #[test]
    fn test_recording_sink_captures_updates() {
        let sink = RecordingSink::default();

        sink.batch_progress(0.5);
        sink.item_progress(0.25);
        sink.status("Downloading");

        assert_eq!(*sink.batch.lock().unwrap(), vec![0.5]);
        assert_eq!(*sink.items.lock().unwrap(), vec![0.25]);
        assert_eq!(*sink.statuses.lock().unwrap(), vec!["Downloading"]);
    }

    #[test]
    fn test_noop_sink_is_object_safe() {
        let sink: Box<dyn ProgressSink> = Box::new(NoopProgress);
        sink.batch_progress(1.0);
        sink.item_progress(1.0);
        sink.status("Done");
    }

    #[test]
    fn test_log_sink_is_object_safe() {
        let sink: Box<dyn ProgressSink> = Box::new(LogProgress::new());
        sink.batch_progress(0.0);
        sink.status("Resolving document");
    }
}
