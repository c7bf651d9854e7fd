//! S3-compatible blob store backed by `aws-sdk-s3`

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use http::Uri;

use super::error::StorageError;
use super::traits::{BlobStore, UploadOptions};
use super::urls::ObjectUrls;
use crate::config::StorageConfig;

pub struct S3BlobStore {
    client: S3Client,
    urls: ObjectUrls,
}

impl S3BlobStore {
    pub fn new(client: S3Client, urls: ObjectUrls) -> Self {
        Self { client, urls }
    }

    /// Build a client from configuration
    ///
    /// Static keys are used when configured; otherwise the default AWS
    /// credential chain applies (environment, profile, instance role).
    pub async fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some((access_key, secret_key)) = config.static_credentials() {
            loader = loader.credentials_provider(aws_credential_types::Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                "mediaport-config",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.path_style())
            .build();

        tracing::debug!(
            region = %config.region,
            endpoint = ?config.endpoint,
            path_style = config.path_style(),
            "S3 client configured"
        );

        let urls = ObjectUrls::from_config(config)?;
        Ok(Self::new(S3Client::from_conf(s3_config), urls))
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        container: &str,
        key: &str,
        body: Bytes,
        options: &UploadOptions,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(container)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(&options.content_type)
            .cache_control(options.cache_control.to_header_value())
            .send()
            .await
            .map_err(|e| StorageError::upload(container, key, DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    async fn delete(&self, container: &str, key: &str) -> Result<(), StorageError> {
        // DeleteObject succeeds for keys that do not exist
        self.client
            .delete_object()
            .bucket(container)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::delete(container, key, DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    fn object_url(&self, container: &str, key: &str) -> Result<Uri, StorageError> {
        self.urls.object_url(container, key)
    }
}
