// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Archiver — moves a finished pair out of the scan directory: both source
// scans into `processed-source/`, the composite into `processed-combined/`.
//
// Moves are renames, never copies. Destination directories must already
// exist; the archiver does not create them. Nothing is rolled back if a
// later move fails.

use std::path::{Path, PathBuf};

use scanpair_core::config::CombinerConfig;
use scanpair_core::error::{Result, ScanpairError};
use scanpair_core::types::ImageFile;
use tracing::{debug, instrument, warn};

/// Final locations of an archived pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedPair {
    pub front: PathBuf,
    pub back: PathBuf,
    pub composite: PathBuf,
}

/// Relocates consumed inputs and produced composites under a scan root.
pub struct Archiver {
    source_dir: PathBuf,
    combined_dir: PathBuf,
}

impl Archiver {
    /// Archive directories are resolved relative to `root` using the names
    /// from `config`.
    pub fn new(root: &Path, config: &CombinerConfig) -> Self {
        Self {
            source_dir: root.join(&config.source_archive_dir),
            combined_dir: root.join(&config.combined_archive_dir),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn combined_dir(&self) -> &Path {
        &self.combined_dir
    }

    /// Move `front`, `back` (both inside `root`), then `composite`, in that
    /// order, keeping their filenames.
    ///
    /// On failure the error names the file that could not be moved and lists
    /// any files of the same pair that were already archived.
    #[instrument(skip_all, fields(base = %front.base))]
    pub fn archive(
        &self,
        root: &Path,
        front: &ImageFile,
        back: &ImageFile,
        composite: &Path,
    ) -> Result<ArchivedPair> {
        let mut moved = Vec::with_capacity(3);
        let front = move_step(&front.path_in(root), &self.source_dir, &mut moved)?;
        let back = move_step(&back.path_in(root), &self.source_dir, &mut moved)?;
        let composite = move_step(composite, &self.combined_dir, &mut moved)?;

        Ok(ArchivedPair {
            front,
            back,
            composite,
        })
    }
}

/// One move of an archive sequence. `moved` holds the files of this pair
/// already relocated, so a failure can report the partial state.
fn move_step(from: &Path, dest_dir: &Path, moved: &mut Vec<PathBuf>) -> Result<PathBuf> {
    match relocate(from, dest_dir) {
        Ok(to) => {
            moved.push(to.clone());
            Ok(to)
        }
        Err(err) if moved.is_empty() => Err(err),
        Err(err) => {
            warn!(already_moved = moved.len(), "pair left partially archived");
            Err(with_partial_note(err, moved))
        }
    }
}

/// Rename `from` into `dest_dir`, refusing to overwrite.
fn relocate(from: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let archive_err = |detail: String| ScanpairError::Archive {
        path: from.to_path_buf(),
        detail,
    };

    if !dest_dir.is_dir() {
        return Err(archive_err(format!(
            "destination directory missing: {}",
            dest_dir.display()
        )));
    }
    let Some(name) = from.file_name() else {
        return Err(archive_err("source has no filename".into()));
    };
    let to = dest_dir.join(name);
    if to.exists() {
        return Err(archive_err(format!(
            "destination already exists: {}",
            to.display()
        )));
    }

    std::fs::rename(from, &to).map_err(|err| archive_err(err.to_string()))?;
    debug!(from = %from.display(), to = %to.display(), "file archived");
    Ok(to)
}

fn with_partial_note(err: ScanpairError, moved: &[PathBuf]) -> ScanpairError {
    match err {
        ScanpairError::Archive { path, detail } => {
            let names: Vec<String> = moved
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            ScanpairError::Archive {
                path,
                detail: format!("{detail} (already archived: {})", names.join(", ")),
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanpair_core::types::Side;

    struct Fixture {
        dir: tempfile::TempDir,
        archiver: Archiver,
        front: ImageFile,
        back: ImageFile,
    }

    fn fixture(create_source: bool, create_combined: bool) -> Fixture {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = CombinerConfig::default();
        if create_source {
            std::fs::create_dir(dir.path().join(&config.source_archive_dir)).expect("mkdir");
        }
        if create_combined {
            std::fs::create_dir(dir.path().join(&config.combined_archive_dir)).expect("mkdir");
        }
        for name in ["docF.jpg", "docB.jpg", "doc.jpg"] {
            std::fs::write(dir.path().join(name), name.as_bytes()).expect("write");
        }
        let archiver = Archiver::new(dir.path(), &config);
        Fixture {
            dir,
            archiver,
            front: ImageFile::new("docF.jpg", "doc", Side::Front),
            back: ImageFile::new("docB.jpg", "doc", Side::Back),
        }
    }

    #[test]
    fn moves_all_three_files() {
        let fx = fixture(true, true);
        let root = fx.dir.path();
        let archived = fx
            .archiver
            .archive(root, &fx.front, &fx.back, &root.join("doc.jpg"))
            .expect("archive");

        assert_eq!(archived.front, root.join("processed-source/docF.jpg"));
        assert_eq!(archived.back, root.join("processed-source/docB.jpg"));
        assert_eq!(archived.composite, root.join("processed-combined/doc.jpg"));
        for name in ["docF.jpg", "docB.jpg", "doc.jpg"] {
            assert!(!root.join(name).exists(), "{name} should be gone");
        }
        assert_eq!(
            std::fs::read(&archived.front).expect("read moved front"),
            b"docF.jpg"
        );
    }

    #[test]
    fn missing_source_dir_fails_before_moving_anything() {
        let fx = fixture(false, true);
        let root = fx.dir.path();
        let err = fx
            .archiver
            .archive(root, &fx.front, &fx.back, &root.join("doc.jpg"))
            .expect_err("must fail");

        match err {
            ScanpairError::Archive { path, detail } => {
                assert_eq!(path, root.join("docF.jpg"));
                assert!(detail.contains("destination directory missing"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(root.join("docF.jpg").exists());
        assert!(root.join("docB.jpg").exists());
    }

    #[test]
    fn missing_combined_dir_leaves_pair_partially_archived() {
        let fx = fixture(true, false);
        let root = fx.dir.path();
        let err = fx
            .archiver
            .archive(root, &fx.front, &fx.back, &root.join("doc.jpg"))
            .expect_err("must fail");

        match err {
            ScanpairError::Archive { path, detail } => {
                assert_eq!(path, root.join("doc.jpg"));
                assert!(detail.contains("already archived: docF.jpg, docB.jpg"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // No rollback.
        assert!(root.join("processed-source/docF.jpg").exists());
        assert!(root.join("doc.jpg").exists());
    }

    #[test]
    fn refuses_to_overwrite() {
        let fx = fixture(true, true);
        let root = fx.dir.path();
        std::fs::write(root.join("processed-source/docF.jpg"), b"older").expect("write");

        let err = fx
            .archiver
            .archive(root, &fx.front, &fx.back, &root.join("doc.jpg"))
            .expect_err("must fail");
        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            std::fs::read(root.join("processed-source/docF.jpg")).expect("read"),
            b"older"
        );
    }
}
