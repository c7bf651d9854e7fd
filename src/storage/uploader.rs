//! Blob uploader
//!
//! Wraps a [`BlobStore`] with the policy every upload shares: the configured
//! Cache-Control lifetime and, when a CDN host is set, rewriting of the
//! returned URL onto that host.

use bytes::Bytes;
use http::Uri;
use std::sync::Arc;

use super::cache_control::CacheControl;
use super::cdn::CdnRewriter;
use super::error::StorageError;
use super::s3::S3BlobStore;
use super::traits::{BlobStore, UploadOptions};
use crate::config::StorageConfig;
use crate::metrics::PipelineMetrics;

#[derive(Clone)]
pub struct BlobUploader {
    store: Arc<dyn BlobStore>,
    cache_control: CacheControl,
    cdn: Option<CdnRewriter>,
}

impl BlobUploader {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            cache_control: CacheControl::default(),
            cdn: None,
        }
    }

    pub fn with_cache_control(mut self, cache_control: CacheControl) -> Self {
        self.cache_control = cache_control;
        self
    }

    pub fn with_cdn(mut self, cdn: CdnRewriter) -> Self {
        self.cdn = Some(cdn);
        self
    }

    /// Apply the cache lifetime and CDN host from configuration to `store`
    pub fn with_store_and_config(
        store: Arc<dyn BlobStore>,
        config: &StorageConfig,
    ) -> Result<Self, StorageError> {
        let mut uploader =
            Self::new(store).with_cache_control(CacheControl::for_years(config.cache_control_years));
        if let Some(host) = &config.cdn_host {
            uploader = uploader.with_cdn(CdnRewriter::new(host)?);
        }
        tracing::debug!(
            cache_control = %uploader.cache_control(),
            cdn_host = ?uploader.cdn_host(),
            "Blob uploader configured"
        );
        Ok(uploader)
    }

    /// Build an S3-backed uploader from configuration
    pub async fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let store = S3BlobStore::from_config(config).await?;
        Self::with_store_and_config(Arc::new(store), config)
    }

    pub fn cache_control(&self) -> CacheControl {
        self.cache_control
    }

    pub fn cdn_host(&self) -> Option<&str> {
        self.cdn.as_ref().map(CdnRewriter::host)
    }

    /// Upload `body` and return its public URL
    pub async fn upload(
        &self,
        container: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<Uri, StorageError> {
        // Resolved first so a stored object always comes with a usable URL
        let url = self.public_url(container, key)?;
        let size = body.len();
        let options = UploadOptions::new(content_type, self.cache_control);

        match self.store.put(container, key, body, &options).await {
            Ok(()) => {
                PipelineMetrics::global().record_upload(true, size);
                tracing::debug!(container, key, bytes = size, content_type, "Uploaded blob");
                Ok(url)
            }
            Err(e) => {
                PipelineMetrics::global().record_upload(false, size);
                Err(e)
            }
        }
    }

    /// Delete `key`; deleting a missing object succeeds
    pub async fn delete(&self, container: &str, key: &str) -> Result<(), StorageError> {
        let result = self.store.delete(container, key).await;
        PipelineMetrics::global().record_delete(result.is_ok());
        if result.is_ok() {
            tracing::debug!(container, key, "Deleted blob");
        }
        result
    }

    /// The URL callers should use for `key`, CDN-rewritten when configured
    pub fn public_url(&self, container: &str, key: &str) -> Result<Uri, StorageError> {
        let native = self.store.object_url(container, key)?;
        match &self.cdn {
            Some(cdn) => cdn.rewrite(&native),
            None => Ok(native),
        }
    }
}

impl std::fmt::Debug for BlobUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobUploader")
            .field("cache_control", &self.cache_control)
            .field("cdn", &self.cdn)
            .finish_non_exhaustive()
    }
}
