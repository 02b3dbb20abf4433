// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanpair-document — Image work for the Scanpair combiner.
//
// Provides the image processor (decode, quarter-turn rotation, exact resize,
// JPEG encoding with DPI), EXIF orientation correction, and the compositor
// that places a front and back scan side by side on one canvas.

pub mod composite;
pub mod image;

#[cfg(test)]
mod fixtures;

// Re-export the primary structs so callers can use `scanpair_document::Compositor` etc.
pub use composite::{CompositeImage, Compositor};
pub use crate::image::orientation::Correction;
pub use crate::image::processor::ImageProcessor;
