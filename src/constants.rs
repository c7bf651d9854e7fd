// Constants module - centralized default values for configuration
//
// Defaults shared by the config loader, the image pipeline and the
// messaging service live here so they are not repeated as magic numbers.

// =============================================================================
// Storage defaults
// =============================================================================

/// Seconds in a (non-leap) year, used to build `max-age` values
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Default cache lifetime of uploaded objects in years
pub const DEFAULT_CACHE_CONTROL_YEARS: u32 = 1;

/// Default S3 region when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Content type used when an upload does not declare one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// =============================================================================
// Imaging defaults
// =============================================================================

/// JPEG quality for regular derivatives
pub const DEFAULT_QUALITY: u8 = 90;

/// JPEG quality for force-square derivatives
pub const SQUARE_QUALITY: u8 = 80;

/// Default padding color for force-square derivatives (opaque white)
pub const DEFAULT_BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// Largest derivative width (and square canvas side) accepted by default
pub const DEFAULT_MAX_WIDTH: u32 = 4096;

/// Matte that translucent pixels are blended onto for formats without alpha
pub const OPAQUE_MATTE: [u8; 3] = [255, 255, 255];

// =============================================================================
// Messaging defaults
// =============================================================================

/// SendGrid v3 mail-send endpoint
pub const DEFAULT_SENDGRID_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

/// Timeout for a single email provider request in seconds
pub const DEFAULT_EMAIL_TIMEOUT_SECS: u64 = 30;

/// Separators accepted between recipients in `Email::to_address`
pub const RECIPIENT_SEPARATORS: &[char] = &[';', ',', '|', ' '];

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";
