//! Image derivative rendering
//!
//! Turns one source buffer into resized, upright renditions:
//!
//! ```text
//! bytes ──► orientation::resolve (once) ──► renderer::render (per width)
//! ```
//!
//! Non-square derivatives cap the longer side at the requested width and are
//! never enlarged. Square derivatives are always exactly `width × width`,
//! centered on the configured background color.

pub mod encoder;
pub mod error;
pub mod geometry;
pub mod orientation;
pub mod params;
pub mod renderer;

#[cfg(test)]
pub(crate) mod test_support;

pub use encoder::{EncodedImage, EncoderFactory, ImageEncoder};
pub use error::ImageError;
pub use geometry::Placement;
pub use orientation::{Rotation, RotationSpec};
pub use params::{BackgroundColor, ImageSettings, OutputFormat, RenderParams};
pub use renderer::{render, RenderedImage};
