#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
use crate::core::emailjs::DEFAULT_API_ENDPOINT;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{RelayError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_TO_NAME: &str = "Site Team";

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "contact-relay")]
#[command(about = "Relay a contact-form submission to the EmailJS API")]
pub struct CliConfig {
    /// Path to a TOML config file supplying any value not given as a flag.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// EmailJS service ID.
    #[arg(long, env = "EMAILJS_SERVICE_ID")]
    pub service_id: Option<String>,

    /// EmailJS template ID.
    #[arg(long, env = "EMAILJS_TEMPLATE_ID")]
    pub template_id: Option<String>,

    /// EmailJS public key (sent as user_id).
    #[arg(long, env = "EMAILJS_PUBLIC_KEY")]
    pub public_key: Option<String>,

    /// Base URL of the EmailJS API. Defaults to the public endpoint.
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Display name substituted into the template's to_name variable.
    #[arg(long)]
    pub to_name: Option<String>,

    /// Minimum milliseconds between form render and submit. Unset disables
    /// the gate, which is the right default for a one-shot CLI invocation.
    #[arg(long)]
    pub min_fill_time_ms: Option<u64>,

    /// Sender name field.
    #[arg(long)]
    pub name: String,

    /// Sender email field.
    #[arg(long)]
    pub email: String,

    /// Message body field.
    #[arg(long)]
    pub message: String,

    #[arg(long, default_value = "", hide = true)]
    pub honeypot: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// The effective configuration after merging flags, file, and defaults.
#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub api_endpoint: String,
    pub to_name: String,
    pub min_fill_time_ms: Option<u64>,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Precedence: explicit flag (or env var), then the `--config` file,
    /// then built-in defaults. Credentials must come from one of the first
    /// two sources.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        self.merge(file)
    }

    fn merge(&self, file: Option<TomlConfig>) -> Result<ResolvedConfig> {
        let file = file.as_ref();
        let resolved = ResolvedConfig {
            service_id: required(
                "service_id",
                &self.service_id,
                file.map(|f| f.emailjs.service_id.as_str()),
            )?,
            template_id: required(
                "template_id",
                &self.template_id,
                file.map(|f| f.emailjs.template_id.as_str()),
            )?,
            public_key: required(
                "public_key",
                &self.public_key,
                file.map(|f| f.emailjs.public_key.as_str()),
            )?,
            api_endpoint: self
                .api_endpoint
                .clone()
                .or_else(|| file.and_then(|f| f.emailjs.endpoint.clone()))
                .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            to_name: self
                .to_name
                .clone()
                .or_else(|| file.and_then(|f| f.form.as_ref()?.to_name.clone()))
                .unwrap_or_else(|| DEFAULT_TO_NAME.to_string()),
            min_fill_time_ms: self
                .min_fill_time_ms
                .or_else(|| file.and_then(|f| f.form.as_ref()?.min_fill_time_ms)),
        };
        resolved.validate()?;
        Ok(resolved)
    }
}

#[cfg(feature = "cli")]
fn required(field: &str, flag: &Option<String>, file: Option<&str>) -> Result<String> {
    flag.as_deref()
        .or(file)
        .map(str::to_string)
        .ok_or_else(|| RelayError::MissingConfigError {
            field: field.to_string(),
        })
}

#[cfg(feature = "cli")]
impl ConfigProvider for ResolvedConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn service_id(&self) -> &str {
        &self.service_id
    }

    fn template_id(&self) -> &str {
        &self.template_id
    }

    fn public_key(&self) -> &str {
        &self.public_key
    }

    fn to_name(&self) -> &str {
        &self.to_name
    }

    fn min_fill_time_ms(&self) -> Option<u64> {
        self.min_fill_time_ms
    }
}

#[cfg(feature = "cli")]
impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("service_id", &self.service_id)?;
        validate_non_empty_string("template_id", &self.template_id)?;
        validate_non_empty_string("public_key", &self.public_key)?;
        validate_non_empty_string("to_name", &self.to_name)?;
        validate_url("api_endpoint", &self.api_endpoint)?;
        Ok(())
    }
}
