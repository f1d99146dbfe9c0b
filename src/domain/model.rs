use crate::utils::error::RelayError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw field values as typed by the visitor, including the hidden honeypot.
/// One draft exists per form instance; it is consumed on submit and cleared
/// after a successful send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub honeypot: String,
}

impl FormDraft {
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.honeypot.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.message.is_empty()
            && self.honeypot.is_empty()
    }
}

/// A draft that passed schema validation. The honeypot has been verified
/// empty and is dropped here; only these three fields reach the mailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Key under which the hidden honeypot reports schema errors. Never shown
/// to a visitor; see [`FieldErrors::visible`].
pub const HONEYPOT_FIELD: &str = "honeypot";

/// Field name mapped to a human-readable message, ordered for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Errors a visitor may actually be shown. The honeypot field is
    /// invisible to humans, so its entry is a bot signal, not feedback;
    /// presenters must iterate this instead of [`FieldErrors::iter`].
    pub fn visible(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(field, _)| *field != HONEYPOT_FIELD)
    }
}

/// Submit lifecycle. `Succeeded` and `Failed` are resting states; any edit
/// returns the form to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmitStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmitStatus::Submitting)
    }
}

/// Why the bot filter silently dropped a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    HoneypotFilled,
    SubmittedTooFast { elapsed_ms: u64, required_ms: u64 },
}

/// What the delivery provider reported for an accepted send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub text: String,
}

/// Result of one submit attempt. `Discarded` is intentionally
/// indistinguishable from a no-op for the visitor; callers get the reason
/// for diagnostics only.
#[derive(Debug)]
pub enum SubmitOutcome {
    Delivered(DeliveryReceipt),
    Invalid(FieldErrors),
    Discarded(DiscardReason),
    Failed(RelayError),
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// User-facing notification emitted after a send attempt resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub title: String,
    pub body: String,
}

impl Feedback {
    pub fn success(body: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            title: "Success".to_string(),
            body: body.into(),
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            title: "Error".to_string(),
            body: body.into(),
        }
    }
}
