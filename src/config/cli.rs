use crate::core::FeedbackSink;
use crate::domain::model::{Feedback, FeedbackKind};

/// Inline-alert presentation for terminal use: success to stdout, errors to
/// stderr. Host applications with richer UI supply their own sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFeedback;

impl FeedbackSink for ConsoleFeedback {
    fn present(&self, feedback: Feedback) {
        match feedback.kind {
            FeedbackKind::Success => {
                tracing::info!("{}: {}", feedback.title, feedback.body);
                println!("✅ {}: {}", feedback.title, feedback.body);
            }
            FeedbackKind::Error => {
                tracing::error!("{}: {}", feedback.title, feedback.body);
                eprintln!("❌ {}: {}", feedback.title, feedback.body);
            }
        }
    }
}
