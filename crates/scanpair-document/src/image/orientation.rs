// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EXIF orientation — reads the camera's Orientation tag (0x0112) and maps it
// to the quarter-turn that undoes the recorded rotation.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use tracing::debug;

/// Orientation tag value: upside down.
pub const ORIENTATION_ROTATE_180: u32 = 3;
/// Orientation tag value: camera turned 90° clockwise when shooting.
pub const ORIENTATION_ROTATE_90_CW: u32 = 6;
/// Orientation tag value: camera turned 90° counter-clockwise when shooting.
pub const ORIENTATION_ROTATE_90_CCW: u32 = 8;

/// Corrective rotation, in counter-clockwise degrees, applied to a decoded
/// scan. Rotations expand the canvas, so width and height swap on 90/270.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Correction {
    /// Map an orientation tag value to its correction. Unrecognised values
    /// and absent metadata need no correction.
    pub fn from_code(code: Option<u32>) -> Self {
        match code {
            Some(ORIENTATION_ROTATE_180) => Self::Rotate180,
            Some(ORIENTATION_ROTATE_90_CW) => Self::Rotate270,
            Some(ORIENTATION_ROTATE_90_CCW) => Self::Rotate90,
            _ => Self::Identity,
        }
    }

    /// Counter-clockwise rotation in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Self::Identity => 0,
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
        }
    }

    /// Rotate `image` by this correction.
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        // `image` rotates clockwise, so a counter-clockwise quarter turn is
        // its 270° rotation and vice versa.
        match self {
            Self::Identity => image,
            Self::Rotate90 => image.rotate270(),
            Self::Rotate180 => image.rotate180(),
            Self::Rotate270 => image.rotate90(),
        }
    }
}

/// Read the primary-image Orientation tag from encoded image bytes.
///
/// Returns `None` when the container has no EXIF block, the block fails to
/// parse, or the tag is absent or non-numeric. Never fails.
pub fn read_orientation(encoded: &[u8]) -> Option<u32> {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(encoded)) {
        Ok(exif) => exif,
        Err(err) => {
            debug!(error = %err, "no usable EXIF block");
            return None;
        }
    };
    let code = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0));
    debug!(?code, "EXIF orientation read");
    code
}

/// Resolve the correction for the image encoded in `encoded`.
pub fn resolve(encoded: &[u8]) -> Correction {
    Correction::from_code(read_orientation(encoded))
}
