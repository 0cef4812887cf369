//! Progress-callback trait for extraction jobs.
//!
//! Inject an [`Arc<dyn ExtractionProgress>`] via
//! [`crate::config::ExtractionConfigBuilder::progress_callback`] to receive
//! events as the pipeline works through its steps.
//!
//! # Why a callback instead of a channel?
//!
//! The callback is the least-invasive integration point: callers can forward
//! events to a terminal progress bar, a session state record, or a channel of
//! their own — without the library knowing how the host application
//! communicates. The trait is `Send + Sync` because the rasterisation loop
//! runs on a blocking-pool thread.

use std::sync::Arc;

/// A single progress observation: what the pipeline is doing and how far
/// along it is, as a percentage in `[0, 100]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub message: String,
    pub percentage: f32,
}

impl Progress {
    pub fn new(message: impl Into<String>, percentage: f32) -> Self {
        Self {
            message: message.into(),
            percentage,
        }
    }
}

/// Called by the extraction pipeline between steps.
///
/// Events arrive in order with monotonically increasing percentages: the
/// read step at 5 %, one event per rasterised page in (10, 80], the relay
/// call at 85 %, and finalisation at 95 %.
pub trait ExtractionProgress: Send + Sync {
    /// Called for every pipeline milestone.
    fn on_progress(&self, message: &str, percentage: f32) {
        let _ = (message, percentage);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgress;

impl ExtractionProgress for NoopProgress {}

/// Convenience alias matching the type stored in
/// [`crate::config::ExtractionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgress>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every event for later inspection.
    struct Recorder {
        events: Mutex<Vec<Progress>>,
    }

    impl ExtractionProgress for Recorder {
        fn on_progress(&self, message: &str, percentage: f32) {
            self.events
                .lock()
                .unwrap()
                .push(Progress::new(message, percentage));
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgress;
        cb.on_progress("Reading PDF file...", 5.0);
    }

    #[test]
    fn recorder_sees_events_in_order() {
        let rec = Recorder {
            events: Mutex::new(Vec::new()),
        };
        rec.on_progress("Reading PDF file...", 5.0);
        rec.on_progress("Converting page 1 of 2 to image...", 45.0);
        rec.on_progress("Converting page 2 of 2 to image...", 80.0);

        let events = rec.events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert!(events.windows(2).all(|w| w[0].percentage < w[1].percentage));
    }

    #[test]
    fn arc_dyn_callback_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProgressCallback>();

        let cb: ProgressCallback = Arc::new(NoopProgress);
        cb.on_progress("Finalizing result...", 95.0);
    }
}
