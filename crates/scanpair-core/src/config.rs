// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanpairError};

/// Largest composite canvas accepted, in bytes of 8-bit RGB pixels (1 GiB).
/// The default 6000x4000 canvas needs 72 MB.
pub const MAX_CANVAS_BYTES: u64 = 1 << 30;

/// Settings for a combine run. The defaults produce 6000x4000 JPEG
/// composites at quality 95 and 72 DPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinerConfig {
    /// Width each side is resized to before compositing.
    pub unit_width: u32,
    /// Height each side is resized to before compositing.
    pub unit_height: u32,
    /// JPEG quality of the composite (1-100).
    pub jpeg_quality: u8,
    /// Horizontal and vertical resolution written into the composite.
    pub dpi: u16,
    /// Subdirectory of the scan root receiving consumed inputs.
    pub source_archive_dir: String,
    /// Subdirectory of the scan root receiving finished composites.
    pub combined_archive_dir: String,
}

impl Default for CombinerConfig {
    fn default() -> Self {
        Self {
            unit_width: 3000,
            unit_height: 4000,
            jpeg_quality: 95,
            dpi: 72,
            source_archive_dir: "processed-source".into(),
            combined_archive_dir: "processed-combined".into(),
        }
    }
}

impl CombinerConfig {
    /// Read a JSON config file. Missing fields take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a valid composite or archive layout.
    pub fn validate(&self) -> Result<()> {
        if self.unit_width == 0 || self.unit_height == 0 {
            return Err(ScanpairError::InvalidConfig(format!(
                "unit size must be non-zero, got {}x{}",
                self.unit_width, self.unit_height
            )));
        }
        let canvas_bytes = self
            .unit_width
            .checked_mul(2)
            .and_then(|w| u64::from(w).checked_mul(u64::from(self.unit_height)))
            .and_then(|px| px.checked_mul(3));
        if !canvas_bytes.is_some_and(|bytes| bytes <= MAX_CANVAS_BYTES) {
            return Err(ScanpairError::InvalidConfig(format!(
                "unit size {}x{} gives a canvas over the {MAX_CANVAS_BYTES}-byte limit",
                self.unit_width, self.unit_height
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ScanpairError::InvalidConfig(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.dpi == 0 {
            return Err(ScanpairError::InvalidConfig("dpi must be non-zero".into()));
        }
        for dir in [&self.source_archive_dir, &self.combined_archive_dir] {
            if dir.is_empty() || dir.contains('/') || dir.contains('\\') {
                return Err(ScanpairError::InvalidConfig(format!(
                    "archive directory must be a plain name, got '{dir}'"
                )));
            }
        }
        Ok(())
    }

    /// Width of the finished composite canvas. Exact for any configuration
    /// that passed `validate`.
    pub fn canvas_width(&self) -> u32 {
        self.unit_width.saturating_mul(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CombinerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.canvas_width(), 6000);
        assert_eq!(config.unit_height, 4000);
    }

    #[test]
    fn zero_unit_rejected() {
        let config = CombinerConfig {
            unit_width: 0,
            ..CombinerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScanpairError::InvalidConfig(_))
        ));
    }

    #[test]
    fn huge_unit_rejected() {
        let overflowing = CombinerConfig {
            unit_width: 3_000_000_000,
            ..CombinerConfig::default()
        };
        assert!(matches!(
            overflowing.validate(),
            Err(ScanpairError::InvalidConfig(_))
        ));
        assert_eq!(overflowing.canvas_width(), u32::MAX);

        let both_max = CombinerConfig {
            unit_width: u32::MAX / 2,
            unit_height: u32::MAX,
            ..CombinerConfig::default()
        };
        assert!(both_max.validate().is_err());

        // Fits in u32 but would need about 4.8 GB of pixels.
        let oversized = CombinerConfig {
            unit_width: 20_000,
            unit_height: 40_000,
            ..CombinerConfig::default()
        };
        assert!(matches!(
            oversized.validate(),
            Err(ScanpairError::InvalidConfig(_))
        ));
    }

    #[test]
    fn largest_canvas_under_limit_accepted() {
        // 2 * 8192 * 8192 * 3 bytes = 384 MiB
        let config = CombinerConfig {
            unit_width: 8192,
            unit_height: 8192,
            ..CombinerConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.canvas_width(), 16_384);
    }

    #[test]
    fn nested_archive_dir_rejected() {
        let config = CombinerConfig {
            combined_archive_dir: "out/combined".into(),
            ..CombinerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_fills_missing_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scanpair.json");
        std::fs::write(&path, r#"{ "jpeg_quality": 80 }"#).expect("write config");

        let config = CombinerConfig::load(&path).expect("load config");
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.unit_width, 3000);
        assert_eq!(config.source_archive_dir, "processed-source");
    }

    #[test]
    fn load_rejects_bad_quality() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scanpair.json");
        std::fs::write(&path, r#"{ "jpeg_quality": 0 }"#).expect("write config");

        assert!(matches!(
            CombinerConfig::load(&path),
            Err(ScanpairError::InvalidConfig(_))
        ));
    }
}
