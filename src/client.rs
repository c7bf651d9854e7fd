//! Services facade
//!
//! Wires the image pipeline and the message service from a single [`Config`].

use crate::config::{Config, EmailSettings};
use crate::error::ServiceError;
use crate::messaging::MessageService;
use crate::pipeline::ImagePipeline;

#[derive(Debug, Clone)]
pub struct ServicesClient {
    pipeline: ImagePipeline,
    messages: MessageService,
}

impl ServicesClient {
    pub fn new(pipeline: ImagePipeline, messages: MessageService) -> Self {
        Self { pipeline, messages }
    }

    /// Validate `config` and build both services
    ///
    /// Missing `storage` or `email` sections are not errors: the pipeline then
    /// reports `NotConfigured` on use and email sends become no-ops.
    pub async fn from_config(config: &Config) -> Result<Self, ServiceError> {
        config.validate().map_err(ServiceError::Config)?;

        let pipeline = ImagePipeline::from_config(config.storage.as_ref()).await?;
        let messages = MessageService::new(config.email.clone().unwrap_or_default())?;

        tracing::info!(
            storage = pipeline.is_configured(),
            email = messages.is_enabled(),
            "Services client initialized"
        );
        Ok(Self { pipeline, messages })
    }

    /// A client with no storage and email disabled
    pub fn unconfigured() -> Self {
        Self {
            pipeline: ImagePipeline::unconfigured(),
            messages: MessageService::disabled(EmailSettings::default()),
        }
    }

    pub fn pipeline(&self) -> &ImagePipeline {
        &self.pipeline
    }

    pub fn messages(&self) -> &MessageService {
        &self.messages
    }
}
