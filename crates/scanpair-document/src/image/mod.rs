// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding, EXIF orientation, resizing, and JPEG output.

pub mod orientation;
pub mod processor;

pub use orientation::Correction;
pub use processor::ImageProcessor;
