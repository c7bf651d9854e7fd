//! Derivative rendering
//!
//! Handles one derivative end to end: decode → orient → resize → pad → encode.
//! The source buffer is only borrowed; every call decodes through its own
//! cursor so renders for different widths can run side by side.

use fast_image_resize::{FilterType, Image, PixelType, ResizeAlg, Resizer};
use image::io::Reader as ImageReader;
use image::{DynamicImage, RgbaImage};
use std::io::Cursor;
use std::num::NonZeroU32;

use super::encoder::EncoderFactory;
use super::error::ImageError;
use super::geometry::{self, Placement};
use super::orientation::RotationSpec;
use super::params::{OutputFormat, RenderParams};
use crate::constants::OPAQUE_MATTE;

/// One rendered derivative
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub data: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

impl RenderedImage {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Render a single derivative of `source`
///
/// Any failure is returned as-is; the caller decides whether the rest of the
/// derivative set is still worth producing.
pub fn render(
    source: &[u8],
    params: &RenderParams,
    rotation: RotationSpec,
) -> Result<RenderedImage, ImageError> {
    let format = detect_format(source)?;
    let decoded = decode_image(source)?;
    let img = if rotation.is_identity() {
        decoded
    } else {
        rotation.apply(decoded)
    };

    let placement = geometry::plan(img.width(), img.height(), params)?;
    let (scaled_w, scaled_h) = placement.scaled;

    let scaled = if (scaled_w, scaled_h) != (img.width(), img.height()) {
        resize_image(&img, scaled_w, scaled_h)?
    } else {
        img
    };

    let mut pixels = if placement.needs_padding() {
        pad(scaled, &placement, params)
    } else {
        scaled.to_rgba8()
    };

    let (width, height) = placement.canvas;
    let encoder = EncoderFactory::create(format);
    if !encoder.supports_transparency() {
        flatten(&mut pixels, OPAQUE_MATTE);
    }
    let encoded = encoder.encode(pixels.as_raw(), width, height, params.quality())?;

    Ok(RenderedImage {
        data: encoded.data,
        format: encoded.format,
        width,
        height,
    })
}

/// Detect the source format from its magic bytes
pub fn detect_format(data: &[u8]) -> Result<OutputFormat, ImageError> {
    let format = image::guess_format(data).map_err(|e| ImageError::decode_failed(e.to_string()))?;
    OutputFormat::from_image_format(format)
}

/// Decode image data into a DynamicImage
fn decode_image(data: &[u8]) -> Result<DynamicImage, ImageError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::decode_failed(e.to_string()))?
        .decode()
        .map_err(|e| ImageError::decode_failed(e.to_string()))
}

/// Center the scaled image on a canvas filled with the background color
fn pad(scaled: DynamicImage, placement: &Placement, params: &RenderParams) -> RgbaImage {
    let (canvas_w, canvas_h) = placement.canvas;
    let (x, y) = placement.offset;
    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, params.background.to_rgba());
    image::imageops::overlay(&mut canvas, &scaled.to_rgba8(), x as i64, y as i64);
    canvas
}

/// Alpha-blend every pixel onto an opaque `matte`
fn flatten(pixels: &mut RgbaImage, matte: [u8; 3]) {
    for pixel in pixels.pixels_mut() {
        let alpha = pixel.0[3] as u32;
        if alpha == 255 {
            continue;
        }
        for (channel, &m) in pixel.0[..3].iter_mut().zip(matte.iter()) {
            *channel = ((*channel as u32 * alpha + m as u32 * (255 - alpha) + 127) / 255) as u8;
        }
        pixel.0[3] = 255;
    }
}

/// Resize image using fast-image-resize with Lanczos3 filter
fn resize_image(img: &DynamicImage, target_w: u32, target_h: u32) -> Result<DynamicImage, ImageError> {
    let src_width =
        NonZeroU32::new(img.width()).ok_or_else(|| ImageError::resize_failed("Source width is 0"))?;
    let src_height = NonZeroU32::new(img.height())
        .ok_or_else(|| ImageError::resize_failed("Source height is 0"))?;
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| ImageError::resize_failed("Target width is 0"))?;
    let dst_height =
        NonZeroU32::new(target_h).ok_or_else(|| ImageError::resize_failed("Target height is 0"))?;

    let src_image = Image::from_vec_u8(
        src_width,
        src_height,
        img.to_rgba8().into_raw(),
        PixelType::U8x4,
    )
    .map_err(|e| ImageError::resize_failed(format!("Failed to create source image: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));
    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| ImageError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

    let rgba_image = RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| ImageError::resize_failed("Failed to create output image buffer"))?;

    Ok(DynamicImage::ImageRgba8(rgba_image))
}
