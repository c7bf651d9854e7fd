//! Blob storage
//!
//! - `BlobStore`: backend capability trait (upload, delete, canonical URL)
//! - `S3BlobStore`: AWS S3 and S3-compatible endpoints
//! - `InMemoryBlobStore`: in-process store for tests and local runs
//! - `BlobUploader`: cache lifetime and CDN rewriting on top of a store

pub mod cache_control;
pub mod cdn;
pub mod error;
pub mod memory;
pub mod s3;
pub mod traits;
pub mod uploader;
pub mod urls;

pub use cache_control::CacheControl;
pub use cdn::CdnRewriter;
pub use error::StorageError;
pub use memory::{InMemoryBlobStore, StoredObject};
pub use s3::S3BlobStore;
pub use traits::{BlobStore, UploadOptions};
pub use uploader::BlobUploader;
pub use urls::ObjectUrls;
