use crate::domain::model::{DeliveryReceipt, Submission};
use crate::domain::ports::{ConfigProvider, Mailer};
use crate::utils::error::{RelayError, Result};
use reqwest::Client;
use serde::Serialize;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.emailjs.com";
const SEND_PATH: &str = "/api/v1.0/email/send";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

// Field names are the template variables the provider substitutes.
// `user_name` and `from_name` intentionally carry the same value.
#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    to_name: &'a str,
    user_name: &'a str,
    from_name: &'a str,
    user_email: &'a str,
    message: &'a str,
}

/// Relays one validated submission to the EmailJS send endpoint. No retry,
/// no client-side timeout; the caller decides what a failure means.
pub struct EmailJsMailer<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> EmailJsMailer<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn send_url(&self) -> String {
        format!(
            "{}{}",
            self.config.api_endpoint().trim_end_matches('/'),
            SEND_PATH
        )
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> Mailer for EmailJsMailer<C> {
    async fn send(&self, submission: &Submission) -> Result<DeliveryReceipt> {
        let url = self.send_url();
        let request = SendRequest {
            service_id: self.config.service_id(),
            template_id: self.config.template_id(),
            user_id: self.config.public_key(),
            template_params: TemplateParams {
                to_name: self.config.to_name(),
                user_name: &submission.name,
                from_name: &submission.name,
                user_email: &submission.email,
                message: &submission.message,
            },
        };

        tracing::debug!("Sending contact email via {}", url);
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        tracing::debug!("EmailJS response status: {}", status);
        let text = response.text().await.unwrap_or_default();

        if status.is_success() {
            Ok(DeliveryReceipt {
                status: status.as_u16(),
                text,
            })
        } else {
            Err(RelayError::DeliveryError {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}
