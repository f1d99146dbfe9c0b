use crate::domain::model::{FieldErrors, FormDraft, Submission, HONEYPOT_FIELD};
use crate::utils::validation::is_valid_email;

pub const NAME_REQUIRED: &str = "Name is required.";
pub const EMAIL_INVALID: &str = "Invalid email address.";
pub const MESSAGE_REQUIRED: &str = "Message is required.";
pub const HONEYPOT_NOT_EMPTY: &str = "Must be empty.";

/// Synchronous schema check over the whole draft. Either every rule passes
/// and the draft collapses into a `Submission`, or the caller gets a
/// field-to-message map and nothing leaves the process.
pub fn validate(draft: &FormDraft) -> Result<Submission, FieldErrors> {
    let mut errors = FieldErrors::default();

    if let Err(message) = check_name(&draft.name) {
        errors.push("name", message);
    }
    if let Err(message) = check_email(&draft.email) {
        errors.push("email", message);
    }
    if let Err(message) = check_message(&draft.message) {
        errors.push("message", message);
    }
    if let Err(message) = check_honeypot(&draft.honeypot) {
        errors.push(HONEYPOT_FIELD, message);
    }

    if errors.is_empty() {
        Ok(Submission {
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            message: draft.message.trim().to_string(),
        })
    } else {
        Err(errors)
    }
}

// Per-field checks are public so a host UI can validate on blur.

pub fn check_name(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(NAME_REQUIRED)
    } else {
        Ok(())
    }
}

pub fn check_email(value: &str) -> Result<(), &'static str> {
    if is_valid_email(value.trim()) {
        Ok(())
    } else {
        Err(EMAIL_INVALID)
    }
}

pub fn check_message(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(MESSAGE_REQUIRED)
    } else {
        Ok(())
    }
}

// The honeypot is invisible to humans, so this message is never rendered;
// it exists so a filled honeypot still blocks the submit at the schema layer.
pub fn check_honeypot(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        Ok(())
    } else {
        Err(HONEYPOT_NOT_EMPTY)
    }
}
