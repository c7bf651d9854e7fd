//! Blob storage configuration.
//!
//! Connection settings for the S3-compatible backend plus the URL shaping
//! applied to every uploaded object (native base URL, CDN host, cache
//! lifetime). Default values are sourced from `crate::constants`.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CACHE_CONTROL_YEARS, DEFAULT_REGION};

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_cache_control_years() -> u32 {
    DEFAULT_CACHE_CONTROL_YEARS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// S3-compatible endpoint (MinIO, LocalStack, ...); AWS when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    /// Defaults to true when a custom endpoint is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_path_style: Option<bool>,
    /// Base for native object URLs, overriding the endpoint-derived one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_host: Option<String>,
    #[serde(default = "default_cache_control_years")]
    pub cache_control_years: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            force_path_style: None,
            public_base_url: None,
            cdn_host: None,
            cache_control_years: default_cache_control_years(),
        }
    }
}

impl StorageConfig {
    pub fn path_style(&self) -> bool {
        self.force_path_style.unwrap_or(self.endpoint.is_some())
    }

    /// Static credentials, if both halves are configured
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (self.access_key.as_deref(), self.secret_key.as_deref()) {
            (Some(access), Some(secret)) if !access.is_empty() && !secret.is_empty() => {
                Some((access, secret))
            }
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.region.trim().is_empty() {
            return Err("Storage region cannot be empty".to_string());
        }

        let has_access = self.access_key.as_deref().is_some_and(|k| !k.is_empty());
        let has_secret = self.secret_key.as_deref().is_some_and(|k| !k.is_empty());
        if has_access != has_secret {
            return Err(
                "Storage access_key and secret_key must be set together".to_string(),
            );
        }

        if self.cache_control_years < 1 {
            return Err("Storage cache_control_years must be >= 1".to_string());
        }

        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(format!(
                    "Storage endpoint '{}' must start with http:// or https://",
                    endpoint
                ));
            }
        }

        if let Some(base) = &self.public_base_url {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(format!(
                    "Storage public_base_url '{}' must start with http:// or https://",
                    base
                ));
            }
        }

        if let Some(host) = &self.cdn_host {
            if host.trim().is_empty() || host.contains("://") || host.contains('/') {
                return Err(format!(
                    "Storage cdn_host '{}' must be a bare host name (no scheme or path)",
                    host
                ));
            }
        }

        Ok(())
    }
}
