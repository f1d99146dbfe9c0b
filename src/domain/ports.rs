use crate::domain::model::{DeliveryReceipt, Feedback, Submission};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Instant;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, submission: &Submission) -> Result<DeliveryReceipt>;
}

/// Monotonic time source for the fill-time gate. Wall clocks jump; the
/// elapsed-since-render measurement must not.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

pub trait FeedbackSink: Send + Sync {
    fn present(&self, feedback: Feedback);
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn service_id(&self) -> &str;
    fn template_id(&self) -> &str;
    fn public_key(&self) -> &str;
    fn to_name(&self) -> &str;
    fn min_fill_time_ms(&self) -> Option<u64>;
}
