//! Blob store trait definition
//!
//! The pipeline only ever talks to this narrow interface: upload, delete and
//! canonical URL. Containers must already exist; nothing here creates them.

use async_trait::async_trait;
use bytes::Bytes;
use http::Uri;

use super::cache_control::CacheControl;
use super::error::StorageError;

/// Metadata written alongside an uploaded object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub content_type: String,
    pub cache_control: CacheControl,
}

impl UploadOptions {
    pub fn new(content_type: impl Into<String>, cache_control: CacheControl) -> Self {
        Self {
            content_type: content_type.into(),
            cache_control,
        }
    }
}

/// Key/value blob store addressed by `(container, key)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `body` under `key`
    /// Overwrites an existing object with the same key
    async fn put(
        &self,
        container: &str,
        key: &str,
        body: Bytes,
        options: &UploadOptions,
    ) -> Result<(), StorageError>;

    /// Delete the object under `key`
    /// A missing object is not an error
    async fn delete(&self, container: &str, key: &str) -> Result<(), StorageError>;

    /// Canonical retrieval URL of an object, as served by the backend
    fn object_url(&self, container: &str, key: &str) -> Result<Uri, StorageError>;
}
