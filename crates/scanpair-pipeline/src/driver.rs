// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline driver — one sequential pass over a scan directory.
//
// The directory is listed once. Each complete pair is composited and then
// archived before the next pair starts; incomplete pairs are reported and
// left alone. Per-pair errors become outcomes and never stop the run. Only
// a missing scan root (or an unreadable listing) aborts before any pair.

use std::path::PathBuf;

use scanpair_core::config::CombinerConfig;
use scanpair_core::error::{Result, ScanpairError};
use scanpair_core::types::{FailureKind, ImageFile, Pair, PairOutcome, RunSummary};
use scanpair_document::Compositor;
use tracing::{error, info, instrument, warn};

use crate::archive::Archiver;
use crate::matcher::scan_directory;

/// Combines and archives every front/back pair under one scan root.
pub struct Pipeline {
    root: PathBuf,
    compositor: Compositor,
    archiver: Archiver,
}

impl Pipeline {
    /// Build a pipeline for `root`. The configuration is validated here; the
    /// root itself is only checked when the run starts.
    pub fn new(root: impl Into<PathBuf>, config: CombinerConfig) -> Result<Self> {
        let root = root.into();
        let archiver = Archiver::new(&root, &config);
        Ok(Self {
            root,
            compositor: Compositor::new(config)?,
            archiver,
        })
    }

    pub fn archiver(&self) -> &Archiver {
        &self.archiver
    }

    /// Run over the whole directory and return the summary.
    pub fn run(&self) -> Result<RunSummary> {
        self.run_with(|_| {})
    }

    /// Run over the whole directory, handing each outcome to `on_outcome`
    /// as soon as its pair finishes.
    #[instrument(skip_all, fields(root = %self.root.display()))]
    pub fn run_with(&self, mut on_outcome: impl FnMut(&PairOutcome)) -> Result<RunSummary> {
        if !self.root.is_dir() {
            error!("scan directory does not exist");
            return Err(ScanpairError::RootDirectoryMissing(self.root.clone()));
        }

        let pairs = scan_directory(&self.root)?;
        info!(pairs = pairs.len(), "scan complete");

        let mut summary = RunSummary::new(&self.root);
        for pair in pairs.values() {
            let outcome = self.process_pair(pair);
            log_outcome(&outcome);
            on_outcome(&outcome);
            summary.record(outcome);
        }
        summary.finish();

        info!(
            succeeded = summary.succeeded,
            warned = summary.warned,
            failed = summary.failed,
            "run complete"
        );
        Ok(summary)
    }

    /// Process a single pair to completion and report what happened.
    pub fn process_pair(&self, pair: &Pair) -> PairOutcome {
        if let Some((front, back)) = pair.sides() {
            return match self.combine_and_archive(front, back) {
                Ok(composite) => PairOutcome::Combined {
                    base: pair.base.clone(),
                    composite,
                },
                Err(err) => PairOutcome::failed(&pair.base, &err),
            };
        }
        match pair.lone() {
            Some(lone) => PairOutcome::MissingCounterpart {
                base: pair.base.clone(),
                present: lone.side,
                file_name: lone.file_name.clone(),
            },
            None => PairOutcome::Failed {
                base: pair.base.clone(),
                kind: FailureKind::Other,
                message: "pair has no scanned sides".into(),
            },
        }
    }

    /// Composite then archive; returns the composite's archived path.
    fn combine_and_archive(&self, front: &ImageFile, back: &ImageFile) -> Result<PathBuf> {
        let composite = self.compositor.combine(&self.root, front, back)?;
        let archived = self
            .archiver
            .archive(&self.root, front, back, &composite)?;
        Ok(archived.composite)
    }
}

/// Run the pipeline once over `root` with `config`.
pub fn run(root: impl Into<PathBuf>, config: CombinerConfig) -> Result<RunSummary> {
    Pipeline::new(root, config)?.run()
}

fn log_outcome(outcome: &PairOutcome) {
    match outcome {
        PairOutcome::Combined { base, composite } => {
            info!(%base, composite = %composite.display(), "pair combined and archived");
        }
        PairOutcome::MissingCounterpart {
            base,
            present,
            file_name,
        } => {
            warn!(%base, %present, %file_name, "missing matching pair");
        }
        PairOutcome::Failed {
            base,
            kind,
            message,
        } => {
            error!(%base, ?kind, %message, "pair failed");
        }
    }
}
