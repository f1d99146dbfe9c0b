pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::ConsoleFeedback, CliConfig, ResolvedConfig};

pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{controller::ContactForm, emailjs::EmailJsMailer};
pub use crate::domain::model::{
    DeliveryReceipt, DiscardReason, Feedback, FeedbackKind, FieldErrors, FormDraft, SubmitOutcome,
    SubmitStatus, Submission,
};
pub use crate::domain::ports::{Clock, ConfigProvider, FeedbackSink, Mailer, MonotonicClock};
pub use crate::utils::error::{RelayError, Result};
