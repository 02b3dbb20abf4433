// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for people running the combiner by hand.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity decides whether the user has to act before a rerun helps.

use crate::error::ScanpairError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk hiccup or similar; rerunning may succeed.
    Transient,
    /// User must do something (create a folder, move a file away).
    ActionRequired,
    /// The input itself is bad; rerunning will not help.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `ScanpairError` into a `HumanError`.
pub fn humanize_error(err: &ScanpairError) -> HumanError {
    match err {
        ScanpairError::RootDirectoryMissing(path) => HumanError {
            message: "The scan folder doesn't exist.".into(),
            suggestion: format!(
                "Check the folder path and try again. (Folder: {})",
                path.display()
            ),
            severity: Severity::ActionRequired,
        },

        ScanpairError::InvalidConfig(detail) => HumanError {
            message: "The settings file has an invalid value.".into(),
            suggestion: format!("Fix the settings file and run again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        ScanpairError::Decode { side, .. } => HumanError {
            message: format!("The {side} scan couldn't be opened as an image."),
            suggestion: "The file may be damaged or not really a JPEG. Rescan that side and run again; the pair was left untouched.".into(),
            severity: Severity::Permanent,
        },

        ScanpairError::Encode { .. } => HumanError {
            message: "The combined image couldn't be saved.".into(),
            suggestion: "Check there is free disk space and that the scan folder is writable, then run again.".into(),
            severity: Severity::Transient,
        },

        ScanpairError::Archive { detail, .. } => humanize_archive_error(detail),

        ScanpairError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Scanpair doesn't have permission to use that file.".into(),
                    suggestion: "Check the folder permissions, then run again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                    severity: Severity::Transient,
                }
            }
        }

        ScanpairError::Serialization(_) => HumanError {
            message: "The settings file isn't valid JSON.".into(),
            suggestion: "Check the settings file for typos, or remove it to use the defaults.".into(),
            severity: Severity::ActionRequired,
        },
    }
}

/// Parse archive failure details into human-readable messages.
fn humanize_archive_error(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("directory missing") {
        HumanError {
            message: "An archive folder is missing.".into(),
            suggestion: "Create the processed-source and processed-combined folders inside the scan folder (or pass --create-dirs), then run again.".into(),
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("already exists") {
        HumanError {
            message: "A file with the same name is already archived.".into(),
            suggestion: "Rename or remove the older file in the archive folder, then run again.".into(),
            severity: Severity::ActionRequired,
        }
    } else {
        HumanError {
            message: "A file couldn't be moved into the archive.".into(),
            suggestion: format!(
                "Some files of this pair may already have been moved. Check both archive folders before running again. (Detail: {detail})"
            ),
            severity: Severity::Transient,
        }
    }
}
