//! Transactional email configuration.
//!
//! A missing or blank `api_token` disables email entirely; sends become
//! silent no-ops rather than errors.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EMAIL_TIMEOUT_SECS, DEFAULT_SENDGRID_ENDPOINT};

fn default_endpoint() -> String {
    DEFAULT_SENDGRID_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_EMAIL_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Default sender when a message names none
    #[serde(default)]
    pub sender_address: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            api_token: None,
            sender_address: String::new(),
            sender_name: String::new(),
            endpoint: default_endpoint(),
            timeout: default_timeout(),
        }
    }
}

impl EmailSettings {
    /// The API token, when email delivery is enabled
    pub fn enabled_token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.enabled_token().is_none() {
            return Ok(());
        }

        if self.sender_address.trim().is_empty() {
            return Err(
                "Email sender_address is required when api_token is configured".to_string(),
            );
        }
        if !self.sender_address.contains('@') {
            return Err(format!(
                "Email sender_address '{}' is not an email address",
                self.sender_address
            ));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(format!(
                "Email endpoint '{}' must start with http:// or https://",
                self.endpoint
            ));
        }
        if self.timeout == 0 {
            return Err("Email timeout must be > 0 seconds".to_string());
        }

        Ok(())
    }
}
