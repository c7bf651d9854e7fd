//! Target geometry for derivatives
//!
//! Pure dimension math, kept apart from pixel work so it can be tested
//! exhaustively without decoding anything.

use super::error::ImageError;
use super::params::RenderParams;

/// Where a scaled image lands on the output canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Output canvas (width, height)
    pub canvas: (u32, u32),
    /// Scaled image (width, height)
    pub scaled: (u32, u32),
    /// Top-left corner of the scaled image on the canvas
    pub offset: (u32, u32),
}

impl Placement {
    /// Whether the canvas is larger than the scaled image
    pub fn needs_padding(&self) -> bool {
        self.canvas != self.scaled
    }
}

/// Plan the output geometry for a `src_w × src_h` image (after rotation)
pub fn plan(src_w: u32, src_h: u32, params: &RenderParams) -> Result<Placement, ImageError> {
    if src_w == 0 || src_h == 0 {
        return Err(ImageError::invalid_dimensions(
            src_w,
            src_h,
            "source has no pixels",
        ));
    }

    if params.width > params.max_width {
        return Err(ImageError::invalid_dimensions(
            params.width,
            params.width,
            format!("width exceeds maximum of {}", params.max_width),
        ));
    }

    if params.force_square {
        let side = if params.width == 0 { src_w.max(src_h) } else { params.width };
        if side > params.max_width {
            return Err(ImageError::invalid_dimensions(
                side,
                side,
                format!("square canvas exceeds maximum of {}", params.max_width),
            ));
        }
        Ok(fit_square(src_w, src_h, params.width))
    } else {
        let scaled = fit_within(src_w, src_h, params.width);
        Ok(Placement {
            canvas: scaled,
            scaled,
            offset: (0, 0),
        })
    }
}

/// Cap the longer side at `width`, preserving aspect ratio and never upscaling
///
/// A `width` of 0 keeps the source size.
pub fn fit_within(src_w: u32, src_h: u32, width: u32) -> (u32, u32) {
    let longer = src_w.max(src_h);
    if width == 0 || longer <= width {
        return (src_w, src_h);
    }
    scale_to(src_w, src_h, width)
}

/// Fit the source inside a `width × width` canvas, centered
///
/// Scales up as well as down so the longer side always touches the canvas
/// edge. A `width` of 0 uses the source's longer side as the canvas.
pub fn fit_square(src_w: u32, src_h: u32, width: u32) -> Placement {
    let side = if width == 0 { src_w.max(src_h) } else { width };
    let (w, h) = scale_to(src_w, src_h, side);
    Placement {
        canvas: (side, side),
        scaled: (w, h),
        offset: ((side - w) / 2, (side - h) / 2),
    }
}

fn scale_to(src_w: u32, src_h: u32, longer_target: u32) -> (u32, u32) {
    let longer = src_w.max(src_h) as f64;
    let ratio = longer_target as f64 / longer;
    let w = ((src_w as f64 * ratio).round() as u32).clamp(1, longer_target);
    let h = ((src_h as f64 * ratio).round() as u32).clamp(1, longer_target);
    (w, h)
}
