//! Error types for pipeline operations

use thiserror::Error;

use crate::imaging::ImageError;
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Decode or render failure; nothing was uploaded
    #[error("Image processing failed: {0}")]
    Image(#[from] ImageError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl PipelineError {
    pub fn is_not_configured(&self) -> bool {
        matches!(self, PipelineError::Storage(StorageError::NotConfigured))
    }
}
