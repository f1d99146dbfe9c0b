use crate::core::bot_filter::BotFilter;
use crate::core::validator;
use crate::domain::model::{
    Feedback, FieldErrors, FormDraft, SubmitOutcome, SubmitStatus,
};
use crate::domain::ports::{Clock, FeedbackSink, Mailer, MonotonicClock};

pub const SUCCESS_FEEDBACK: &str = "Your message has been sent!";
pub const FAILURE_FEEDBACK: &str = "Failed to send your message. Please try again later.";

// If the caller drops the submit future mid-await (e.g. under a timeout),
// the in-flight state must not outlive it. Dropping an unfinished guard
// returns the form to Idle.
struct InFlightGuard<'a> {
    status: &'a mut SubmitStatus,
    done: bool,
}

impl InFlightGuard<'_> {
    fn finish(&mut self, status: SubmitStatus) {
        *self.status = status;
        self.done = true;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            *self.status = SubmitStatus::Idle;
        }
    }
}

/// Owns the draft, its validation errors, and the submit lifecycle:
/// Idle -> Submitting -> (Succeeded | Failed) -> Idle. At most one send is
/// in flight; overlapping submits are refused without side effects.
pub struct ContactForm<M: Mailer, F: FeedbackSink, K: Clock> {
    mailer: M,
    feedback: F,
    clock: K,
    bot_filter: BotFilter,
    draft: FormDraft,
    errors: FieldErrors,
    status: SubmitStatus,
}

impl<M: Mailer, F: FeedbackSink> ContactForm<M, F, MonotonicClock> {
    /// `min_fill_time_ms: None` is the variant without the time gate.
    pub fn new(mailer: M, feedback: F, min_fill_time_ms: Option<u64>) -> Self {
        Self::with_clock(mailer, feedback, min_fill_time_ms, MonotonicClock)
    }
}

impl<M: Mailer, F: FeedbackSink, K: Clock> ContactForm<M, F, K> {
    pub fn with_clock(mailer: M, feedback: F, min_fill_time_ms: Option<u64>, clock: K) -> Self {
        // Render time is captured here; the fill-time gate measures from it.
        let bot_filter = BotFilter::new(clock.now(), min_fill_time_ms);
        Self {
            mailer,
            feedback,
            clock,
            bot_filter,
            draft: FormDraft::default(),
            errors: FieldErrors::default(),
            status: SubmitStatus::Idle,
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.draft.name = value.into();
        self.touch();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.draft.email = value.into();
        self.touch();
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.draft.message = value.into();
        self.touch();
    }

    pub fn set_honeypot(&mut self, value: impl Into<String>) {
        self.draft.honeypot = value.into();
        self.touch();
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    /// Mirrors the disabled state of a submit control.
    pub fn can_submit(&self) -> bool {
        !self.status.is_in_flight()
    }

    // Editing after a resolved attempt returns the form to Idle.
    fn touch(&mut self) {
        if matches!(self.status, SubmitStatus::Succeeded | SubmitStatus::Failed) {
            self.status = SubmitStatus::Idle;
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.status.is_in_flight() {
            return SubmitOutcome::InFlight;
        }

        let submission = match validator::validate(&self.draft) {
            Ok(submission) => {
                self.errors = FieldErrors::default();
                submission
            }
            Err(errors) => {
                tracing::debug!("Submission blocked by {} validation error(s)", errors.len());
                self.errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
        };

        if let Err(reason) = self.bot_filter.screen(&self.draft.honeypot, self.clock.now()) {
            // Silent by policy: no feedback, no network call.
            tracing::debug!("Submission discarded by bot filter: {:?}", reason);
            return SubmitOutcome::Discarded(reason);
        }

        self.status = SubmitStatus::Submitting;
        let mut guard = InFlightGuard {
            status: &mut self.status,
            done: false,
        };

        match self.mailer.send(&submission).await {
            Ok(receipt) => {
                tracing::info!("Email successfully sent: {} {}", receipt.status, receipt.text);
                self.draft.clear();
                self.errors = FieldErrors::default();
                guard.finish(SubmitStatus::Succeeded);
                self.feedback.present(Feedback::success(SUCCESS_FEEDBACK));
                SubmitOutcome::Delivered(receipt)
            }
            Err(err) => {
                tracing::error!("Failed to send email: {}", err);
                // Draft is retained so the visitor can retry as-is.
                guard.finish(SubmitStatus::Failed);
                self.feedback.present(Feedback::error(FAILURE_FEEDBACK));
                SubmitOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DeliveryReceipt, DiscardReason, FeedbackKind, Submission};
    use crate::utils::error::{RelayError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    #[derive(Clone, Default)]
    struct MockMailer {
        sent: Arc<Mutex<Vec<Submission>>>,
        fail: bool,
    }

    impl MockMailer {
        fn failing() -> Self {
            Self {
                sent: Arc::default(),
                fail: true,
            }
        }

        fn sent(&self) -> Vec<Submission> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, submission: &Submission) -> Result<DeliveryReceipt> {
            self.sent.lock().unwrap().push(submission.clone());
            if self.fail {
                Err(RelayError::DeliveryError {
                    status: 500,
                    body: "boom".to_string(),
                })
            } else {
                Ok(DeliveryReceipt {
                    status: 200,
                    text: "OK".to_string(),
                })
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingFeedback {
        shown: Arc<Mutex<Vec<Feedback>>>,
    }

    impl RecordingFeedback {
        fn shown(&self) -> Vec<Feedback> {
            self.shown.lock().unwrap().clone()
        }
    }

    impl FeedbackSink for RecordingFeedback {
        fn present(&self, feedback: Feedback) {
            self.shown.lock().unwrap().push(feedback);
        }
    }

    #[derive(Clone)]
    struct ManualClock {
        now: Arc<Mutex<Instant>>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Arc::new(Mutex::new(Instant::now())),
            }
        }

        fn advance(&self, duration: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += duration;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    // Hangs forever on the first send, succeeds on later ones.
    #[derive(Clone, Default)]
    struct HangFirstMailer {
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl Mailer for HangFirstMailer {
        async fn send(&self, _submission: &Submission) -> Result<DeliveryReceipt> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                std::future::pending::<()>().await;
            }
            Ok(DeliveryReceipt {
                status: 200,
                text: "OK".to_string(),
            })
        }
    }

    fn fill_valid<M: Mailer, F: FeedbackSink, K: Clock>(form: &mut ContactForm<M, F, K>) {
        form.set_name("Ada Lovelace");
        form.set_email("ada@example.com");
        form.set_message("Hello there");
    }

    #[tokio::test]
    async fn test_success_clears_draft_and_presents_success() {
        let mailer = MockMailer::default();
        let feedback = RecordingFeedback::default();
        let mut form = ContactForm::new(mailer.clone(), feedback.clone(), None);
        fill_valid(&mut form);

        let outcome = form.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Delivered(_)));
        assert_eq!(form.status(), SubmitStatus::Succeeded);
        assert!(form.draft().is_empty());
        assert!(form.errors().is_empty());
        assert_eq!(mailer.sent().len(), 1);
        assert_eq!(mailer.sent()[0].email, "ada@example.com");

        let shown = feedback.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, FeedbackKind::Success);
    }

    #[tokio::test]
    async fn test_failure_retains_draft_and_presents_error() {
        let mailer = MockMailer::failing();
        let feedback = RecordingFeedback::default();
        let mut form = ContactForm::new(mailer.clone(), feedback.clone(), None);
        fill_valid(&mut form);

        let outcome = form.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(form.status(), SubmitStatus::Failed);
        assert_eq!(form.draft().name, "Ada Lovelace");
        assert_eq!(form.draft().message, "Hello there");
        assert!(form.can_submit());

        let shown = feedback.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, FeedbackKind::Error);
    }

    #[tokio::test]
    async fn test_invalid_fields_block_network_call() {
        let mailer = MockMailer::default();
        let feedback = RecordingFeedback::default();
        let mut form = ContactForm::new(mailer.clone(), feedback.clone(), None);
        form.set_email("not-an-email");

        let outcome = form.submit().await;

        match outcome {
            SubmitOutcome::Invalid(errors) => {
                assert!(errors.get("name").is_some());
                assert!(errors.get("email").is_some());
                assert!(errors.get("message").is_some());
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert!(mailer.sent().is_empty());
        assert!(feedback.shown().is_empty());
        assert!(form.errors().get("email").is_some());
    }

    #[tokio::test]
    async fn test_filled_honeypot_blocks_network_call() {
        let mailer = MockMailer::default();
        let feedback = RecordingFeedback::default();
        let mut form = ContactForm::new(mailer.clone(), feedback.clone(), None);
        fill_valid(&mut form);
        form.set_honeypot("https://spam.example");

        let outcome = form.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(mailer.sent().is_empty());
        assert!(feedback.shown().is_empty());
    }

    #[tokio::test]
    async fn test_time_gate_discards_fast_submit_then_allows_later() {
        let mailer = MockMailer::default();
        let feedback = RecordingFeedback::default();
        let clock = ManualClock::new();
        let mut form =
            ContactForm::with_clock(mailer.clone(), feedback.clone(), Some(5000), clock.clone());
        fill_valid(&mut form);

        clock.advance(Duration::from_millis(1500));
        let outcome = form.submit().await;
        match outcome {
            SubmitOutcome::Discarded(DiscardReason::SubmittedTooFast {
                elapsed_ms,
                required_ms,
            }) => {
                assert_eq!(elapsed_ms, 1500);
                assert_eq!(required_ms, 5000);
            }
            other => panic!("expected SubmittedTooFast, got {:?}", other),
        }
        assert!(mailer.sent().is_empty());
        assert!(feedback.shown().is_empty());
        assert_eq!(form.status(), SubmitStatus::Idle);

        clock.advance(Duration::from_millis(4000));
        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Delivered(_)));
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_abandoned_submit_future_releases_the_form() {
        let feedback = RecordingFeedback::default();
        let mut form = ContactForm::new(HangFirstMailer::default(), feedback, None);
        fill_valid(&mut form);

        // The send never resolves; the caller gives up and drops the future.
        let timed_out = tokio::time::timeout(Duration::from_millis(20), form.submit()).await;
        assert!(timed_out.is_err());

        assert_eq!(form.status(), SubmitStatus::Idle);
        assert!(form.can_submit());

        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Delivered(_)));
    }

    #[tokio::test]
    async fn test_editing_after_resolution_returns_to_idle() {
        let mailer = MockMailer::default();
        let feedback = RecordingFeedback::default();
        let mut form = ContactForm::new(mailer, feedback, None);
        fill_valid(&mut form);

        form.submit().await;
        assert_eq!(form.status(), SubmitStatus::Succeeded);

        form.set_name("Grace Hopper");
        assert_eq!(form.status(), SubmitStatus::Idle);
    }
}
