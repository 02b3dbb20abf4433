// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanpair-pipeline — Directory scanning, front/back pair matching, archiving
// of consumed scans and finished composites, and the driver that runs them
// over one scan directory.

pub mod archive;
pub mod driver;
pub mod matcher;

pub use archive::{ArchivedPair, Archiver};
pub use driver::{Pipeline, run};
pub use matcher::{ScanName, classify, match_pairs, scan_directory};
