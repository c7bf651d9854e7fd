//! Error types for messaging operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("Invalid email address '{0}'")]
    InvalidAddress(String),

    #[error("Email provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Email provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}
