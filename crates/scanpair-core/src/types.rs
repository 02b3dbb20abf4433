// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Scanpair: scanned sides, front/back pairs, and the
// per-pair outcomes collected into a run summary.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScanpairError;

/// Which physical side of a document a scan shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Back,
}

impl Side {
    /// The opposite side.
    pub fn counterpart(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
        }
    }
}

/// A single scanned image on disk, identified by its filename within the
/// scan directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    /// Filename exactly as listed in the directory.
    pub file_name: String,
    /// Filename minus the side marker and extension.
    pub base: String,
    pub side: Side,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, base: impl Into<String>, side: Side) -> Self {
        Self {
            file_name: file_name.into(),
            base: base.into(),
            side,
        }
    }

    /// Full path of this file inside `dir`.
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

/// Front and back scans sharing one base identifier. Either side may be
/// absent; only complete pairs are ever composited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub base: String,
    pub front: Option<ImageFile>,
    pub back: Option<ImageFile>,
}

impl Pair {
    /// An empty pair for `base`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            front: None,
            back: None,
        }
    }

    /// Return this pair with `file` placed in the slot for its side.
    pub fn with(mut self, file: ImageFile) -> Self {
        match file.side {
            Side::Front => self.front = Some(file),
            Side::Back => self.back = Some(file),
        }
        self
    }

    pub fn is_complete(&self) -> bool {
        self.front.is_some() && self.back.is_some()
    }

    /// Both sides as `(front, back)` when the pair is complete.
    pub fn sides(&self) -> Option<(&ImageFile, &ImageFile)> {
        match (&self.front, &self.back) {
            (Some(front), Some(back)) => Some((front, back)),
            _ => None,
        }
    }

    /// The only present side of an incomplete pair.
    pub fn lone(&self) -> Option<&ImageFile> {
        match (&self.front, &self.back) {
            (Some(file), None) | (None, Some(file)) => Some(file),
            _ => None,
        }
    }
}

/// Category of a per-pair failure, kept separate from the message so
/// summaries can be filtered without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// An input side could not be read or decoded.
    Decode,
    /// The composite could not be encoded or written.
    Encode,
    /// A relocation into the archive directories failed.
    Archive,
    Other,
}

impl From<&ScanpairError> for FailureKind {
    fn from(err: &ScanpairError) -> Self {
        match err {
            ScanpairError::Decode { .. } => Self::Decode,
            ScanpairError::Encode { .. } => Self::Encode,
            ScanpairError::Archive { .. } => Self::Archive,
            _ => Self::Other,
        }
    }
}

/// Result of processing one base identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PairOutcome {
    /// Composite written and all three files archived.
    Combined { base: String, composite: PathBuf },
    /// Only one side exists; the file was left in place.
    MissingCounterpart {
        base: String,
        present: Side,
        file_name: String,
    },
    /// Compositing or archiving failed for this pair.
    Failed {
        base: String,
        kind: FailureKind,
        message: String,
    },
}

impl PairOutcome {
    /// Build a `Failed` outcome from the error that stopped the pair.
    pub fn failed(base: impl Into<String>, err: &ScanpairError) -> Self {
        Self::Failed {
            base: base.into(),
            kind: FailureKind::from(err),
            message: err.to_string(),
        }
    }

    pub fn base(&self) -> &str {
        match self {
            Self::Combined { base, .. }
            | Self::MissingCounterpart { base, .. }
            | Self::Failed { base, .. } => base,
        }
    }
}

impl std::fmt::Display for PairOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Combined { composite, .. } => {
                write!(f, "Created combined image: {}", composite.display())
            }
            Self::MissingCounterpart {
                base,
                present,
                file_name,
            } => write!(
                f,
                "Warning: missing {} for {base} (only {present} present: {file_name})",
                present.counterpart()
            ),
            Self::Failed { base, message, .. } => write!(f, "Error: {base}: {message}"),
        }
    }
}

/// Tally of one run over a scan directory.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub root: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub succeeded: usize,
    pub warned: usize,
    pub failed: usize,
    /// Outcomes in processing order.
    pub outcomes: Vec<PairOutcome>,
}

impl RunSummary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            started_at: Utc::now(),
            finished_at: None,
            succeeded: 0,
            warned: 0,
            failed: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: PairOutcome) {
        match outcome {
            PairOutcome::Combined { .. } => self.succeeded += 1,
            PairOutcome::MissingCounterpart { .. } => self.warned += 1,
            PairOutcome::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_completes_with_both_sides() {
        let pair = Pair::new("doc1")
            .with(ImageFile::new("doc1F.jpg", "doc1", Side::Front))
            .with(ImageFile::new("doc1B.jpg", "doc1", Side::Back));
        assert!(pair.is_complete());
        assert!(pair.lone().is_none());
        let (front, back) = pair.sides().expect("complete pair");
        assert_eq!(front.file_name, "doc1F.jpg");
        assert_eq!(back.file_name, "doc1B.jpg");
    }

    #[test]
    fn lone_side_reported() {
        let pair = Pair::new("doc2").with(ImageFile::new("doc2B.jpg", "doc2", Side::Back));
        assert!(!pair.is_complete());
        assert!(pair.sides().is_none());
        assert_eq!(pair.lone().map(|f| f.side), Some(Side::Back));
    }

    #[test]
    fn summary_counts_by_outcome() {
        let mut summary = RunSummary::new("/scans");
        summary.record(PairOutcome::Combined {
            base: "a".into(),
            composite: PathBuf::from("/scans/processed-combined/a.jpg"),
        });
        summary.record(PairOutcome::MissingCounterpart {
            base: "b".into(),
            present: Side::Front,
            file_name: "bF.jpg".into(),
        });
        let err = ScanpairError::Archive {
            path: PathBuf::from("/scans/cF.jpg"),
            detail: "destination directory missing".into(),
        };
        summary.record(PairOutcome::failed("c", &err));
        summary.finish();

        assert_eq!(
            (summary.succeeded, summary.warned, summary.failed),
            (1, 1, 1)
        );
        assert_eq!(summary.total(), 3);
        assert!(summary.finished_at.is_some());
        assert_eq!(summary.outcomes[2].base(), "c");
    }

    #[test]
    fn failure_kind_follows_error_variant() {
        let err = ScanpairError::Decode {
            base: "x".into(),
            side: Side::Back,
            detail: "truncated".into(),
        };
        match PairOutcome::failed("x", &err) {
            PairOutcome::Failed { kind, message, .. } => {
                assert_eq!(kind, FailureKind::Decode);
                assert!(message.contains("back"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = PairOutcome::MissingCounterpart {
            base: "doc1".into(),
            present: Side::Front,
            file_name: "doc1F.jpg".into(),
        };
        let json = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(json["outcome"], "missing_counterpart");
        assert_eq!(json["present"], "front");
    }

    #[test]
    fn missing_counterpart_message_names_absent_side() {
        let outcome = PairOutcome::MissingCounterpart {
            base: "doc1".into(),
            present: Side::Front,
            file_name: "doc1F.jpg".into(),
        };
        assert_eq!(
            outcome.to_string(),
            "Warning: missing back for doc1 (only front present: doc1F.jpg)"
        );
    }
}
