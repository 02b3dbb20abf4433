// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scanpair.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Side;

/// Top-level error type for all Scanpair operations.
///
/// A missing counterpart is not an error: it is reported as
/// `PairOutcome::MissingCounterpart`. Unreadable orientation metadata never
/// surfaces here either; it is treated as "no orientation".
#[derive(Debug, Error)]
pub enum ScanpairError {
    // -- Run-level --
    #[error("scan directory {} does not exist", .0.display())]
    RootDirectoryMissing(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Per-pair --
    #[error("failed to decode {side} image for '{base}': {detail}")]
    Decode {
        base: String,
        side: Side,
        detail: String,
    },

    #[error("failed to write composite for '{base}': {detail}")]
    Encode { base: String, detail: String },

    #[error("failed to archive {}: {detail}", .path.display())]
    Archive { path: PathBuf, detail: String },

    // -- Plumbing --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanpairError>;
