// Error types module

use thiserror::Error;

use crate::messaging::MessagingError;
use crate::pipeline::PipelineError;
use crate::storage::StorageError;

/// Centralized error type for the services facade
///
/// Categorizes failures by the concern that raised them so callers can tell
/// a bad configuration apart from a backend outage.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration errors (invalid YAML, missing env vars, failed validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage backend construction or operation failures
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Messaging error: {0}")]
    Messaging(#[from] MessagingError),
}
