//! Transactional messaging
//!
//! Email goes through an [`EmailProvider`] (SendGrid by default). Without an
//! API token the service is disabled and every send quietly does nothing.
//! Recipients are delivered one by one; a failure for one of them is logged
//! and the rest still go out.

mod email;
mod error;
mod provider;
mod sendgrid;
mod sms;

pub use email::{Email, EmailAddress};
pub use error::MessagingError;
pub use provider::{EmailProvider, OutgoingEmail};
pub use sendgrid::SendGridProvider;
pub use sms::Sms;

#[cfg(test)]
pub use provider::MockEmailProvider;

use std::sync::Arc;

use crate::config::EmailSettings;
use crate::metrics::PipelineMetrics;

/// Per-call delivery outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failed: usize,
    /// True when email is disabled and nothing was attempted
    pub skipped: bool,
}

#[derive(Clone)]
pub struct MessageService {
    settings: EmailSettings,
    provider: Option<Arc<dyn EmailProvider>>,
}

impl MessageService {
    /// SendGrid-backed service, disabled when no API token is configured
    pub fn new(settings: EmailSettings) -> Result<Self, MessagingError> {
        let provider: Option<Arc<dyn EmailProvider>> = match settings.enabled_token() {
            Some(_) => Some(Arc::new(SendGridProvider::new(&settings)?)),
            None => None,
        };
        Ok(Self { settings, provider })
    }

    pub fn with_provider(settings: EmailSettings, provider: Arc<dyn EmailProvider>) -> Self {
        Self {
            settings,
            provider: Some(provider),
        }
    }

    pub fn disabled(settings: EmailSettings) -> Self {
        Self {
            settings,
            provider: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Send `email` to each of its recipients
    ///
    /// Never fails as a whole: invalid or rejected recipients are logged and
    /// counted in the report.
    pub async fn send(&self, email: &Email) -> DeliveryReport {
        let provider = match &self.provider {
            Some(provider) => provider,
            None => {
                PipelineMetrics::global().record_email("skipped");
                tracing::debug!(subject = %email.subject, "Email disabled, skipping send");
                return DeliveryReport {
                    skipped: true,
                    ..Default::default()
                };
            }
        };

        let from = EmailAddress::new(
            email
                .from_address
                .clone()
                .unwrap_or_else(|| self.settings.sender_address.clone()),
            email
                .from_name
                .clone()
                .or_else(|| Some(self.settings.sender_name.clone())),
        );

        tracing::info!(recipients = %email.to_address, "Sending email");

        let mut report = DeliveryReport::default();
        for recipient in email.recipients() {
            let result = match EmailAddress::parse(recipient) {
                Ok(to) => {
                    let message = OutgoingEmail {
                        from: from.clone(),
                        to,
                        subject: email.subject.clone(),
                        html: email.message.clone(),
                    };
                    tracing::debug!(recipient, "Sending email to recipient");
                    provider.send(&message).await
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => {
                    report.sent += 1;
                    PipelineMetrics::global().record_email("sent");
                }
                Err(e) => {
                    report.failed += 1;
                    PipelineMetrics::global().record_email("failed");
                    tracing::error!(recipient, error = %e, "Failed to send email");
                }
            }
        }
        report
    }

    /// SMS delivery has been retired; this does nothing
    #[deprecated(note = "SMS delivery is no longer supported; this is a no-op")]
    pub fn send_sms(&self, sms: &Sms) {
        tracing::debug!(to = %sms.phone_number(), "SMS delivery is disabled, ignoring message");
    }
}

impl std::fmt::Debug for MessageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageService")
            .field("sender_address", &self.settings.sender_address)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
