//! Derivative parameters
//!
//! [`ImageSettings`] is what callers hand to the pipeline; [`RenderParams`] is
//! the per-width slice of it that the renderer actually needs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ImageError;
use crate::constants::{DEFAULT_BACKGROUND, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY, SQUARE_QUALITY};

fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

/// Output image format
///
/// Derivatives keep the format of their source so the key's extension and the
/// stored content type stay accurate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Gif => "gif",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Map a decoder-detected format onto one we can write back
    pub fn from_image_format(format: image::ImageFormat) -> Result<Self, ImageError> {
        match format {
            image::ImageFormat::Jpeg => Ok(Self::Jpeg),
            image::ImageFormat::Png => Ok(Self::Png),
            image::ImageFormat::WebP => Ok(Self::WebP),
            image::ImageFormat::Gif => Ok(Self::Gif),
            other => Err(ImageError::unsupported_format(format!("{:?}", other))),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" | "image/jpeg" => Ok(OutputFormat::Jpeg),
            "png" | "image/png" => Ok(OutputFormat::Png),
            "webp" | "image/webp" => Ok(OutputFormat::WebP),
            "gif" | "image/gif" => Ok(OutputFormat::Gif),
            _ => Err(ImageError::unsupported_format(s)),
        }
    }
}

/// RGBA color used to pad force-square derivatives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BackgroundColor(pub [u8; 4]);

impl BackgroundColor {
    pub const WHITE: BackgroundColor = BackgroundColor([255, 255, 255, 255]);
    pub const TRANSPARENT: BackgroundColor = BackgroundColor([0, 0, 0, 0]);

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba(self.0)
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self(DEFAULT_BACKGROUND)
    }
}

impl FromStr for BackgroundColor {
    type Err = ImageError;

    /// Accepts `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ImageError::InvalidColor {
            value: s.to_string(),
        };
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut channels = [255u8; 4];
        for (i, channel) in channels.iter_mut().enumerate().take(hex.len() / 2) {
            *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(channels))
    }
}

impl TryFrom<String> for BackgroundColor {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BackgroundColor> for String {
    fn from(color: BackgroundColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

/// Caller-facing resize settings for one upload
///
/// Each entry of `widths` yields exactly one derivative, in order. A width of
/// `0` keeps the source size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSettings {
    pub widths: Vec<u32>,
    #[serde(default)]
    pub force_square: bool,
    #[serde(default)]
    pub background_color: BackgroundColor,
    /// Upper bound for every entry of `widths` (default: 4096)
    #[serde(default = "default_max_width")]
    pub max_width: u32,
}

impl ImageSettings {
    pub fn new(widths: impl Into<Vec<u32>>) -> Self {
        Self {
            widths: widths.into(),
            force_square: false,
            background_color: BackgroundColor::default(),
            max_width: default_max_width(),
        }
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    /// Reject widths above `max_width` before any pixel work starts
    pub fn validate(&self) -> Result<(), ImageError> {
        match self.widths.iter().find(|&&width| width > self.max_width) {
            Some(&width) => Err(ImageError::invalid_dimensions(
                width,
                width,
                format!("width exceeds maximum of {}", self.max_width),
            )),
            None => Ok(()),
        }
    }

    /// Pad every derivative onto a `width × width` canvas of `background`
    pub fn square(mut self, background: BackgroundColor) -> Self {
        self.force_square = true;
        self.background_color = background;
        self
    }

    pub fn render_params(&self, width: u32) -> RenderParams {
        RenderParams {
            width,
            force_square: self.force_square,
            background: self.background_color,
            max_width: self.max_width,
        }
    }
}

/// Geometry and padding for a single derivative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderParams {
    pub width: u32,
    pub force_square: bool,
    pub background: BackgroundColor,
    pub max_width: u32,
}

impl RenderParams {
    /// Lossy encoding quality for this derivative
    pub fn quality(&self) -> u8 {
        if self.force_square {
            SQUARE_QUALITY
        } else {
            DEFAULT_QUALITY
        }
    }
}
