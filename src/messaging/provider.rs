//! Email provider trait definition

use async_trait::async_trait;

use super::email::EmailAddress;
use super::error::MessagingError;

/// A single-recipient message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: EmailAddress,
    pub to: EmailAddress,
    pub subject: String,
    pub html: String,
}

/// Transactional email backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Deliver one message to one recipient
    async fn send(&self, message: &OutgoingEmail) -> Result<(), MessagingError>;
}
