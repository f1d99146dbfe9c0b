use crate::config::DEFAULT_TO_NAME;
use crate::core::emailjs::DEFAULT_API_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub emailjs: EmailJsSection,
    pub form: Option<FormSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJsSection {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSection {
    pub to_name: Option<String>,
    pub min_fill_time_ms: Option<u64>,
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        Ok(config)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        self.emailjs
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_API_ENDPOINT)
    }

    fn service_id(&self) -> &str {
        &self.emailjs.service_id
    }

    fn template_id(&self) -> &str {
        &self.emailjs.template_id
    }

    fn public_key(&self) -> &str {
        &self.emailjs.public_key
    }

    fn to_name(&self) -> &str {
        self.form
            .as_ref()
            .and_then(|form| form.to_name.as_deref())
            .unwrap_or(DEFAULT_TO_NAME)
    }

    fn min_fill_time_ms(&self) -> Option<u64> {
        self.form.as_ref().and_then(|form| form.min_fill_time_ms)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("emailjs.service_id", &self.emailjs.service_id)?;
        validate_non_empty_string("emailjs.template_id", &self.emailjs.template_id)?;
        validate_non_empty_string("emailjs.public_key", &self.emailjs.public_key)?;
        if let Some(endpoint) = &self.emailjs.endpoint {
            validate_url("emailjs.endpoint", endpoint)?;
        }
        if let Some(form) = &self.form {
            if let Some(to_name) = &form.to_name {
                validate_non_empty_string("form.to_name", to_name)?;
            }
        }
        Ok(())
    }
}
