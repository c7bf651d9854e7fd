//! Cache-Control metadata for uploaded objects
//!
//! Keys are never reused (every name carries a fresh tick), so uploaded
//! objects are marked publicly cacheable for a long, fixed lifetime.
//!
//! ```rust
//! use mediaport::storage::CacheControl;
//!
//! let cc = CacheControl::for_years(1);
//! assert_eq!(cc.to_header_value(), "public, max-age=31536000");
//! ```

use std::fmt;
use std::time::Duration;

use crate::constants::{DEFAULT_CACHE_CONTROL_YEARS, SECONDS_PER_YEAR};

/// Cache-Control directives written on upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheControl {
    /// Freshness lifetime (max-age directive)
    pub max_age: Duration,
}

impl CacheControl {
    /// Publicly cacheable for `years` 365-day years
    pub fn for_years(years: u32) -> Self {
        Self {
            max_age: Duration::from_secs(SECONDS_PER_YEAR * years as u64),
        }
    }

    pub fn to_header_value(&self) -> String {
        format!("public, max-age={}", self.max_age.as_secs())
    }
}

impl Default for CacheControl {
    fn default() -> Self {
        Self::for_years(DEFAULT_CACHE_CONTROL_YEARS)
    }
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}
