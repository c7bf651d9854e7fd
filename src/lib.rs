// Mediaport: image derivative pipeline, blob storage and transactional email

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod imaging;
pub mod logging;
pub mod messaging;
pub mod metrics;
pub mod naming;
pub mod pipeline;
pub mod storage;

pub use client::ServicesClient;
pub use config::Config;
pub use error::ServiceError;
pub use imaging::{BackgroundColor, ImageSettings};
pub use messaging::{Email, MessageService, Sms};
pub use pipeline::{ImagePipeline, PipelineError, SourceAsset, StoredAsset};
