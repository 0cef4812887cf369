//! Session state: the presenter's view of one upload lifecycle.
//!
//! The state is a single tagged variant rather than a bag of independent
//! flags, so impossible combinations — an error message while idle, a result
//! while processing — are unrepresentable. Transitions follow a total order:
//!
//! ```text
//! Idle ──▶ Processing ──▶ Success
//!                    └──▶ Error
//! (any state) ──reset──▶ Idle
//! ```
//!
//! A session never spans uploads: reset clears everything, and a fresh
//! upload after a reset is indistinguishable from a fresh session.

use crate::config::ExtractionConfig;
use crate::extract;
use crate::intake::UploadFile;
use crate::pipeline::relay::RelayClient;
use crate::progress::Progress;
use std::time::{Duration, Instant};

/// How long the "copied" acknowledgment stays visible.
pub const COPY_ACK_TTL: Duration = Duration::from_secs(2);

/// The four states of an upload lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No upload in flight, nothing held.
    Idle,
    /// An extraction is running; carries the latest observed progress.
    Processing { progress: Option<Progress> },
    /// The extraction finished; the text is held verbatim.
    Success { text: String },
    /// The job failed; the message is always non-empty.
    Error { message: String },
}

/// One upload lifecycle: current phase, file name, copy acknowledgment.
#[derive(Debug)]
pub struct Session {
    phase: Phase,
    file_name: String,
    copied_at: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            file_name: String::new(),
            copied_at: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The extracted text, if the session is in the success state.
    pub fn text(&self) -> Option<&str> {
        match &self.phase {
            Phase::Success { text } => Some(text),
            _ => None,
        }
    }

    /// Begin processing a new upload. Clears any prior error or result.
    ///
    /// Returns `false` (and changes nothing) if an extraction is already in
    /// flight — the control surface allows one upload lifecycle at a time.
    pub fn begin(&mut self, file_name: impl Into<String>) -> bool {
        if matches!(self.phase, Phase::Processing { .. }) {
            return false;
        }
        self.phase = Phase::Processing { progress: None };
        self.file_name = file_name.into();
        self.copied_at = None;
        true
    }

    /// Record a progress observation. Ignored outside the processing state.
    pub fn set_progress(&mut self, progress: Progress) {
        if let Phase::Processing { progress: p } = &mut self.phase {
            *p = Some(progress);
        }
    }

    /// Transition to success, holding the text verbatim. The text is only
    /// ever replaced wholesale, never mutated incrementally.
    pub fn succeed(&mut self, text: impl Into<String>) {
        self.phase = Phase::Success { text: text.into() };
    }

    /// Transition to the error state with a non-empty message.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug_assert!(!message.is_empty());
        self.phase = Phase::Error { message };
    }

    /// Return to idle, clearing text, file name, error, and copy state.
    /// Idempotent from any state. Does not abort an in-flight network call;
    /// it only clears display state.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.file_name.clear();
        self.copied_at = None;
    }

    /// Record that the held text was copied to the clipboard.
    pub fn mark_copied(&mut self) {
        self.copied_at = Some(Instant::now());
    }

    /// Whether the transient "copied" acknowledgment is still showing.
    pub fn copy_acknowledged(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.duration_since(at) < COPY_ACK_TTL)
    }

    /// Output file name for the PDF export: the upload's name with a
    /// case-insensitive `.pdf` suffix stripped and `-extracted.pdf` appended.
    pub fn export_file_name(&self) -> String {
        crate::export::export_file_name(&self.file_name)
    }

    /// Drive a full extraction job and land in success or error.
    ///
    /// This is the linear control flow of the system: validate, rasterise,
    /// relay, present. Failures end in the error state with the user-facing
    /// message ([`ExtractError::user_message`]); the session is always
    /// recoverable from there via [`Session::reset`].
    pub async fn process(
        &mut self,
        file: UploadFile,
        config: &ExtractionConfig,
        relay: &RelayClient,
    ) -> &Phase {
        if !self.begin(file.name.clone()) {
            return &self.phase;
        }

        match extract::extract(&file, config, relay).await {
            Ok(text) => self.succeed(text),
            Err(e) => self.fail(e.user_message()),
        }

        &self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let s = Session::new();
        assert_eq!(*s.phase(), Phase::Idle);
        assert!(s.file_name().is_empty());
        assert!(s.text().is_none());
    }

    #[test]
    fn begin_clears_prior_error_and_result() {
        let mut s = Session::new();
        s.begin("a.pdf");
        s.fail("Failed to process PDF: boom");
        assert!(s.begin("b.pdf"));
        assert_eq!(*s.phase(), Phase::Processing { progress: None });
        assert_eq!(s.file_name(), "b.pdf");
    }

    #[test]
    fn begin_refused_while_processing() {
        let mut s = Session::new();
        assert!(s.begin("a.pdf"));
        assert!(!s.begin("b.pdf"));
        assert_eq!(s.file_name(), "a.pdf");
    }

    #[test]
    fn progress_is_only_recorded_while_processing() {
        let mut s = Session::new();
        s.set_progress(Progress::new("Reading PDF file...", 5.0));
        assert_eq!(*s.phase(), Phase::Idle);

        s.begin("a.pdf");
        s.set_progress(Progress::new("Reading PDF file...", 5.0));
        match s.phase() {
            Phase::Processing { progress: Some(p) } => assert_eq!(p.percentage, 5.0),
            other => panic!("unexpected phase: {other:?}"),
        }
    }

    #[test]
    fn reset_is_idempotent_from_every_state() {
        let mut s = Session::new();

        // From idle.
        s.reset();
        assert_eq!(*s.phase(), Phase::Idle);

        // From processing.
        s.begin("a.pdf");
        s.reset();
        assert_eq!(*s.phase(), Phase::Idle);
        assert!(s.file_name().is_empty());

        // From success, with copy state set.
        s.begin("a.pdf");
        s.succeed("**Q1.** text");
        s.mark_copied();
        s.reset();
        assert_eq!(*s.phase(), Phase::Idle);
        assert!(s.text().is_none());
        assert!(!s.copy_acknowledged(Instant::now()));

        // From error.
        s.begin("a.pdf");
        s.fail("Failed to process PDF: x");
        s.reset();
        s.reset();
        assert_eq!(*s.phase(), Phase::Idle);
        assert!(s.file_name().is_empty());
    }

    #[test]
    fn copy_acknowledgment_expires_after_the_ttl() {
        let mut s = Session::new();
        s.begin("a.pdf");
        s.succeed("text");
        s.mark_copied();

        let now = Instant::now();
        assert!(s.copy_acknowledged(now));
        assert!(!s.copy_acknowledged(now + COPY_ACK_TTL));
        assert!(!s.copy_acknowledged(now + COPY_ACK_TTL * 2));
    }

    #[test]
    fn export_file_name_follows_the_upload() {
        let mut s = Session::new();
        s.begin("Half Yearly Paper.PDF");
        assert_eq!(s.export_file_name(), "Half Yearly Paper-extracted.pdf");
    }

    #[tokio::test]
    async fn process_with_invalid_type_lands_in_error() {
        let mut s = Session::new();
        let config = ExtractionConfig::default();
        let relay = RelayClient::new("http://127.0.0.1:1/api/extract");

        let file = UploadFile::new("scan.png", "image/png", vec![0u8; 8]);
        let phase = s.process(file, &config, &relay).await;

        match phase {
            Phase::Error { message } => {
                assert_eq!(message, "Invalid file type. Please upload a PDF file.");
            }
            other => panic!("unexpected phase: {other:?}"),
        }

        // Fully recoverable.
        s.reset();
        assert_eq!(*s.phase(), Phase::Idle);
    }
}
