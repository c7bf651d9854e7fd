//! In-process blob store
//!
//! Keeps objects in a map behind an async lock. Used by tests and local
//! development where no S3 endpoint is available. Uploads can be made to fail
//! for keys containing a marker, to exercise failure paths.

use async_trait::async_trait;
use bytes::Bytes;
use http::Uri;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::cache_control::CacheControl;
use super::error::StorageError;
use super::traits::{BlobStore, UploadOptions};
use super::urls::ObjectUrls;

/// A stored object with its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
    pub cache_control: CacheControl,
}

pub struct InMemoryBlobStore {
    objects: RwLock<HashMap<(String, String), StoredObject>>,
    urls: ObjectUrls,
    fail_marker: Option<String>,
    put_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            urls: ObjectUrls::path_style(base_url),
            fail_marker: None,
            put_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Fail every upload whose key contains `marker`
    pub fn failing_uploads_containing(mut self, marker: impl Into<String>) -> Self {
        self.fail_marker = Some(marker.into());
        self
    }

    pub async fn get(&self, container: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .await
            .get(&(container.to_string(), key.to_string()))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Number of `put` calls, including failed ones
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(
        &self,
        container: &str,
        key: &str,
        body: Bytes,
        options: &UploadOptions,
    ) -> Result<(), StorageError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(marker) = &self.fail_marker {
            if key.contains(marker.as_str()) {
                return Err(StorageError::upload(container, key, "injected failure"));
            }
        }

        let object = StoredObject {
            body,
            content_type: options.content_type.clone(),
            cache_control: options.cache_control,
        };
        self.objects
            .write()
            .await
            .insert((container.to_string(), key.to_string()), object);
        Ok(())
    }

    async fn delete(&self, container: &str, key: &str) -> Result<(), StorageError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.objects
            .write()
            .await
            .remove(&(container.to_string(), key.to_string()));
        Ok(())
    }

    fn object_url(&self, container: &str, key: &str) -> Result<Uri, StorageError> {
        self.urls.object_url(container, key)
    }
}
