//! SendGrid v3 mail-send provider

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use super::error::MessagingError;
use super::provider::{EmailProvider, OutgoingEmail};
use crate::config::EmailSettings;

pub struct SendGridProvider {
    http_client: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl SendGridProvider {
    /// # Errors
    ///
    /// Returns `MessagingError::Configuration` when no API token is set or the
    /// HTTP client cannot be created.
    pub fn new(settings: &EmailSettings) -> Result<Self, MessagingError> {
        let api_token = settings
            .enabled_token()
            .ok_or_else(|| MessagingError::Configuration("SendGrid API token is not set".into()))?
            .to_string();

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout))
            .build()
            .map_err(|e| {
                MessagingError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            endpoint: settings.endpoint.clone(),
            api_token,
        })
    }

    /// Request body for the v3 `mail/send` endpoint
    pub fn payload(message: &OutgoingEmail) -> serde_json::Value {
        json!({
            "personalizations": [{ "to": [message.to] }],
            "from": message.from,
            "subject": message.subject,
            "content": [{ "type": "text/html", "value": message.html }],
        })
    }
}

#[async_trait]
impl EmailProvider for SendGridProvider {
    async fn send(&self, message: &OutgoingEmail) -> Result<(), MessagingError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&Self::payload(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MessagingError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
