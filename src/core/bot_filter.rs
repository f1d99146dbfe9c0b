use crate::domain::model::DiscardReason;
use std::time::{Duration, Instant};

pub const DEFAULT_MIN_FILL_TIME_MS: u64 = 5000;

/// Two advisory heuristics, checked before any network call: a honeypot
/// field that must stay empty, and optionally a minimum time between render
/// and submit. Rejections are silent to the visitor. These are heuristics,
/// not a security boundary; there is no server-side backstop here.
#[derive(Debug, Clone)]
pub struct BotFilter {
    rendered_at: Instant,
    min_fill_time: Option<Duration>,
}

impl BotFilter {
    pub fn new(rendered_at: Instant, min_fill_time_ms: Option<u64>) -> Self {
        Self {
            rendered_at,
            min_fill_time: min_fill_time_ms.map(Duration::from_millis),
        }
    }

    /// The time-gated variant with the stock 5-second threshold.
    pub fn gated(rendered_at: Instant) -> Self {
        Self::new(rendered_at, Some(DEFAULT_MIN_FILL_TIME_MS))
    }

    pub fn screen(&self, honeypot: &str, now: Instant) -> Result<(), DiscardReason> {
        if !honeypot.is_empty() {
            return Err(DiscardReason::HoneypotFilled);
        }

        if let Some(required) = self.min_fill_time {
            let elapsed = now.saturating_duration_since(self.rendered_at);
            if elapsed < required {
                return Err(DiscardReason::SubmittedTooFast {
                    elapsed_ms: elapsed.as_millis() as u64,
                    required_ms: required.as_millis() as u64,
                });
            }
        }

        Ok(())
    }
}
