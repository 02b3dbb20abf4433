// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode, orientation correction, exact resize, and JPEG
// encoding with resolution metadata. Operates on in-memory images using the
// `image` crate.

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::imageops::FilterType;
use image::{DynamicImage, ImageResult, RgbImage};
use tracing::{debug, instrument};

use crate::image::orientation::{self, Correction};

/// Image processing pipeline operating on a single in-memory scan.
///
/// Each transformation consumes `self` and returns a new `ImageProcessor`
/// wrapping the transformed image, enabling method chaining:
///
/// ```ignore
/// let side = ImageProcessor::from_bytes(&bytes)?
///     .auto_orient(&bytes)
///     .resize_exact(3000, 4000)
///     .into_rgb8();
/// ```
///
/// Errors are returned as raw `image::ImageError`s; callers attach the pair
/// and side they were working on.
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Decode raw encoded bytes (JPEG, PNG, etc.). The format is sniffed from
    /// the content, not from any filename.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> ImageResult<Self> {
        let img = image::load_from_memory(data)?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return 8-bit RGB pixels. Any alpha channel
    /// is dropped, not blended.
    pub fn into_rgb8(self) -> RgbImage {
        match self.image {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => other.to_rgb8(),
        }
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Apply a quarter-turn orientation correction.
    pub fn orient(self, correction: Correction) -> Self {
        if correction != Correction::Identity {
            debug!(degrees = correction.degrees(), "Undoing camera rotation");
        }
        Self {
            image: correction.apply(self.image),
        }
    }

    /// Read the EXIF orientation tag from `encoded` (the bytes this image was
    /// decoded from) and undo the camera rotation it records. Missing or
    /// unreadable metadata leaves the image unchanged.
    pub fn auto_orient(self, encoded: &[u8]) -> Self {
        self.orient(orientation::resolve(encoded))
    }

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    /// Uses Lanczos3 filtering.
    #[instrument(skip(self))]
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        if self.image.width() == width && self.image.height() == height {
            return self;
        }
        debug!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            "Resizing image"
        );
        let resized = self
            .image
            .resize_exact(width, height, FilterType::Lanczos3);
        Self { image: resized }
    }
}

/// Encode RGB pixels as a JPEG with the given quality (1-100) and a square
/// DPI written into the JFIF header.
pub fn encode_jpeg(rgb: &RgbImage, quality: u8, dpi: u16) -> ImageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder.set_pixel_density(PixelDensity::dpi(dpi));
    rgb.write_with_encoder(encoder)?;
    Ok(buffer)
}
