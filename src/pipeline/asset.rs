//! Source and stored asset types

use bytes::Bytes;
use http::Uri;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::constants::DEFAULT_CONTENT_TYPE;
use crate::naming;

/// An uploaded file, buffered once in memory
///
/// The buffer is immutable and cheap to clone, so every consumer (orientation
/// probe, per-width renders, raw upload) reads it independently.
#[derive(Debug, Clone)]
pub struct SourceAsset {
    file_name: String,
    content_type: String,
    bytes: Bytes,
}

impl SourceAsset {
    /// Any client-side directory prefix on `file_name` is dropped
    pub fn new(
        file_name: impl AsRef<str>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: naming::file_name_only(file_name.as_ref()).to_string(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Drain `reader` to the end and buffer it
    pub async fn from_reader<R>(
        file_name: impl AsRef<str>,
        content_type: impl Into<String>,
        mut reader: R,
    ) -> std::io::Result<Self>
    where
        R: AsyncRead + Unpin,
    {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await?;
        Ok(Self::new(file_name, content_type, buffer))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Declared MIME type, or `application/octet-stream` when none was given
    pub fn content_type(&self) -> &str {
        if self.content_type.trim().is_empty() {
            DEFAULT_CONTENT_TYPE
        } else {
            &self.content_type
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A persisted object and the URL callers should use for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub uri: Uri,
    pub key: String,
}

impl StoredAsset {
    pub fn url(&self) -> String {
        self.uri.to_string()
    }
}
