//! CDN host rewriting
//!
//! Swaps the storage backend's native host for the CDN edge host. The scheme
//! is forced to https and any explicit port is dropped; path and query are
//! kept as-is.

use http::uri::{Authority, PathAndQuery, Scheme};
use http::Uri;

use super::error::StorageError;

#[derive(Debug, Clone)]
pub struct CdnRewriter {
    host: Authority,
}

impl CdnRewriter {
    /// Accepts a bare host such as `cdn.example.com`
    ///
    /// Schemes, paths and user info are rejected. A port is accepted but never
    /// makes it into rewritten URLs.
    pub fn new(host: &str) -> Result<Self, StorageError> {
        let host = host.trim();
        if host.is_empty() || host.contains(&['/', '@', '?', '#'][..]) {
            return Err(StorageError::InvalidCdnHost(host.to_string()));
        }
        let authority: Authority = host
            .parse()
            .map_err(|_| StorageError::InvalidCdnHost(host.to_string()))?;
        let host: Authority = authority
            .host()
            .parse()
            .map_err(|_| StorageError::InvalidCdnHost(host.to_string()))?;
        Ok(Self { host })
    }

    pub fn host(&self) -> &str {
        self.host.host()
    }

    pub fn rewrite(&self, uri: &Uri) -> Result<Uri, StorageError> {
        let mut parts = uri.clone().into_parts();
        parts.scheme = Some(Scheme::HTTPS);
        parts.authority = Some(self.host.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        Uri::from_parts(parts).map_err(|e| StorageError::invalid_uri(uri.to_string(), e))
    }
}
