pub mod bot_filter;
pub mod controller;
pub mod emailjs;
pub mod validator;

pub use crate::domain::model::{
    DeliveryReceipt, DiscardReason, Feedback, FeedbackKind, FieldErrors, FormDraft, SubmitOutcome,
    SubmitStatus, Submission,
};
pub use crate::domain::ports::{Clock, ConfigProvider, FeedbackSink, Mailer, MonotonicClock};
pub use crate::utils::error::Result;
