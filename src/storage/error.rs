//! Error types for blob storage operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage is not configured")]
    NotConfigured,

    #[error("Upload of {container}/{key} failed: {message}")]
    Upload {
        container: String,
        key: String,
        message: String,
    },

    #[error("Delete of {container}/{key} failed: {message}")]
    Delete {
        container: String,
        key: String,
        message: String,
    },

    #[error("Invalid URI '{value}': {message}")]
    InvalidUri { value: String, message: String },

    #[error("Invalid CDN host '{0}': expected a bare host name")]
    InvalidCdnHost(String),
}

impl StorageError {
    pub fn upload(container: &str, key: &str, message: impl Into<String>) -> Self {
        StorageError::Upload {
            container: container.to_string(),
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn delete(container: &str, key: &str, message: impl Into<String>) -> Self {
        StorageError::Delete {
            container: container.to_string(),
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_uri(value: impl Into<String>, message: impl ToString) -> Self {
        StorageError::InvalidUri {
            value: value.into(),
            message: message.to_string(),
        }
    }
}
