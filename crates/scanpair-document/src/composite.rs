// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compositor — loads both sides of a pair, corrects their orientation,
// stretches each to the canonical unit size, and places them side by side
// (front left, back right) on an RGB canvas saved as `<base>.jpg`.

use std::path::{Path, PathBuf};

use image::{RgbImage, imageops};
use scanpair_core::config::CombinerConfig;
use scanpair_core::error::{Result, ScanpairError};
use scanpair_core::types::ImageFile;
use tracing::{debug, info, instrument, warn};

use crate::image::processor::{ImageProcessor, encode_jpeg};

/// A finished front/back canvas, not yet written to disk.
#[derive(Debug, Clone)]
pub struct CompositeImage {
    base: String,
    canvas: RgbImage,
}

impl CompositeImage {
    /// Output filename, `<base>.jpg`.
    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.base)
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Borrow the canvas pixels.
    pub fn as_rgb(&self) -> &RgbImage {
        &self.canvas
    }
}

/// Builds and saves side-by-side composites.
///
/// The canvas is always `2 * unit_width` x `unit_height`; sources whose
/// aspect ratio differs from the unit are stretched, not letterboxed.
pub struct Compositor {
    config: CombinerConfig,
}

impl Compositor {
    /// Fails with `ScanpairError::InvalidConfig` for settings `validate`
    /// rejects, so the canvas size is always allocatable.
    pub fn new(config: CombinerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Read and decode one side from `dir`, with its EXIF orientation undone.
    ///
    /// The file is read once; orientation comes from the same bytes that are
    /// decoded. Unreadable files and undecodable content both surface as
    /// `ScanpairError::Decode` naming the side.
    #[instrument(skip_all, fields(file = %file.file_name, side = %file.side))]
    pub fn load_side(&self, dir: &Path, file: &ImageFile) -> Result<ImageProcessor> {
        let decode_err = |detail: String| ScanpairError::Decode {
            base: file.base.clone(),
            side: file.side,
            detail,
        };

        let encoded = std::fs::read(file.path_in(dir)).map_err(|err| decode_err(err.to_string()))?;
        let processor =
            ImageProcessor::from_bytes(&encoded).map_err(|err| decode_err(err.to_string()))?;
        let oriented = processor.auto_orient(&encoded);
        debug!(
            width = oriented.width(),
            height = oriented.height(),
            "Side loaded"
        );
        Ok(oriented)
    }

    /// Resize both sides to the unit size and place them on one canvas.
    #[instrument(skip(self, front, back))]
    pub fn compose(&self, base: &str, front: ImageProcessor, back: ImageProcessor) -> CompositeImage {
        let (unit_w, unit_h) = (self.config.unit_width, self.config.unit_height);

        let front = front.resize_exact(unit_w, unit_h).into_rgb8();
        let back = back.resize_exact(unit_w, unit_h).into_rgb8();

        let mut canvas = RgbImage::new(self.config.canvas_width(), unit_h);
        imageops::replace(&mut canvas, &front, 0, 0);
        imageops::replace(&mut canvas, &back, i64::from(unit_w), 0);

        CompositeImage {
            base: base.to_owned(),
            canvas,
        }
    }

    /// Encode `composite` and write it into `dir` as `<base>.jpg`.
    ///
    /// Encoding happens fully in memory first; a failed write removes
    /// whatever part of the file reached the disk.
    #[instrument(skip_all, fields(base = %composite.base))]
    pub fn save(&self, dir: &Path, composite: &CompositeImage) -> Result<PathBuf> {
        let encode_err = |detail: String| ScanpairError::Encode {
            base: composite.base.clone(),
            detail,
        };

        let bytes = encode_jpeg(&composite.canvas, self.config.jpeg_quality, self.config.dpi)
            .map_err(|err| encode_err(err.to_string()))?;

        let path = dir.join(composite.file_name());
        if let Err(err) = std::fs::write(&path, &bytes) {
            if path.exists() {
                if let Err(cleanup) = std::fs::remove_file(&path) {
                    warn!(error = %cleanup, path = %path.display(), "could not remove partial composite");
                }
            }
            return Err(encode_err(err.to_string()));
        }

        debug!(bytes = bytes.len(), path = %path.display(), "Composite written");
        Ok(path)
    }

    /// Full compositing step for one complete pair: load, orient, compose,
    /// save. Returns the path of the composite inside `dir`.
    ///
    /// Both sides are decoded before anything is written, so a decode
    /// failure never leaves an output file behind.
    #[instrument(skip_all, fields(base = %front.base))]
    pub fn combine(&self, dir: &Path, front: &ImageFile, back: &ImageFile) -> Result<PathBuf> {
        let front_img = self.load_side(dir, front)?;
        let back_img = self.load_side(dir, back)?;

        let composite = self.compose(&front.base, front_img, back_img);
        let path = self.save(dir, &composite)?;

        info!(
            output = %composite.file_name(),
            width = composite.width(),
            height = composite.height(),
            "Created combined image"
        );
        Ok(path)
    }
}
