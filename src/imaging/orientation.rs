//! EXIF orientation correction
//!
//! Reads tag 274 (`Orientation`) once per source and turns it into a
//! [`RotationSpec`]: a clockwise rotation followed by an optional horizontal
//! flip. Every derivative of the source gets the same correction.
//!
//! | Tag | Correction |
//! |-----|------------|
//! | 1 / absent / other | identity |
//! | 3 | rotate 180° |
//! | 4 | rotate 180° + flip |
//! | 5 | rotate 90° + flip |
//! | 6 | rotate 90° |
//! | 7 | rotate 270° + flip |
//! | 8 | rotate 270° |
//!
//! Tag 2 (mirror only) is left uncorrected.

use image::DynamicImage;
use std::io::Cursor;

/// Clockwise rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

/// Corrective transform for a source image: rotate, then optionally mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationSpec {
    pub rotation: Rotation,
    pub flip_horizontal: bool,
}

impl RotationSpec {
    pub const IDENTITY: RotationSpec = RotationSpec {
        rotation: Rotation::None,
        flip_horizontal: false,
    };

    pub const fn new(rotation: Rotation, flip_horizontal: bool) -> Self {
        Self {
            rotation,
            flip_horizontal,
        }
    }

    /// Map an EXIF orientation value to its correction
    pub fn from_orientation(value: u32) -> Self {
        match value {
            3 => Self::new(Rotation::Cw180, false),
            4 => Self::new(Rotation::Cw180, true),
            5 => Self::new(Rotation::Cw90, true),
            6 => Self::new(Rotation::Cw90, false),
            7 => Self::new(Rotation::Cw270, true),
            8 => Self::new(Rotation::Cw270, false),
            _ => Self::IDENTITY,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply(&self, img: DynamicImage) -> DynamicImage {
        let rotated = match self.rotation {
            Rotation::None => img,
            Rotation::Cw90 => img.rotate90(),
            Rotation::Cw180 => img.rotate180(),
            Rotation::Cw270 => img.rotate270(),
        };
        if self.flip_horizontal {
            rotated.fliph()
        } else {
            rotated
        }
    }
}

/// Read the raw orientation tag, if the container carries EXIF data
pub fn read_orientation(data: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(data);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0)
}

/// Resolve the correction for a source buffer
///
/// Reads through its own cursor, so the caller's buffer is left untouched for
/// decoding. Missing or unreadable metadata resolves to identity.
pub fn resolve(data: &[u8]) -> RotationSpec {
    read_orientation(data)
        .map(RotationSpec::from_orientation)
        .unwrap_or(RotationSpec::IDENTITY)
}
