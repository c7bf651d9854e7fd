//! Native object URLs
//!
//! The URL shape follows the addressing style the S3 client uses. First match
//! wins:
//!
//! ```text
//! public_base_url         https://assets.example.com/{container}/{key}
//! endpoint, path style    http://127.0.0.1:9000/{container}/{key}
//! endpoint, virtual host  http://{container}.minio.local:9000/{key}
//! AWS, path style         https://s3.{region}.amazonaws.com/{container}/{key}
//! AWS                     https://{container}.s3.{region}.amazonaws.com/{key}
//! ```

use http::Uri;

use super::error::StorageError;
use crate::config::StorageConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectUrls {
    /// `{base}/{container}/{key}`
    PathStyle { base: String },
    /// `{scheme}://{container}.{host}/{key}`
    VirtualHosted { scheme: String, host: String },
}

impl ObjectUrls {
    pub fn path_style(base: impl Into<String>) -> Self {
        ObjectUrls::PathStyle {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        if let Some(base) = &config.public_base_url {
            return Ok(Self::path_style(base.as_str()));
        }

        let aws_host = format!("s3.{}.amazonaws.com", config.region);
        match (&config.endpoint, config.path_style()) {
            (Some(endpoint), true) => Ok(Self::path_style(endpoint.as_str())),
            (Some(endpoint), false) => {
                let uri: Uri = endpoint
                    .parse()
                    .map_err(|e| StorageError::invalid_uri(endpoint.as_str(), e))?;
                let host = uri
                    .authority()
                    .ok_or_else(|| StorageError::invalid_uri(endpoint.as_str(), "missing host"))?;
                Ok(ObjectUrls::VirtualHosted {
                    scheme: uri.scheme_str().unwrap_or("https").to_string(),
                    host: host.to_string(),
                })
            }
            (None, true) => Ok(Self::path_style(format!("https://{}", aws_host))),
            (None, false) => Ok(ObjectUrls::VirtualHosted {
                scheme: "https".to_string(),
                host: aws_host,
            }),
        }
    }

    pub fn object_url(&self, container: &str, key: &str) -> Result<Uri, StorageError> {
        let key = encode_key(key);
        let url = match self {
            ObjectUrls::PathStyle { base } => format!("{}/{}/{}", base, container, key),
            ObjectUrls::VirtualHosted { scheme, host } => {
                format!("{}://{}.{}/{}", scheme, container, host, key)
            }
        };
        url.parse::<Uri>()
            .map_err(|e| StorageError::invalid_uri(url.clone(), e))
    }
}

/// Percent-encode each path segment of a key, keeping `/` separators
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
