// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pair matcher — lists a scan directory and groups `<base>F.jpg` /
// `<base>B.jpg` files into front/back pairs keyed by base identifier.
//
// Discovery admits `.jpg`, `.jpeg`, and `.png`, but only the exact suffixes
// `F.jpg` and `B.jpg` (uppercase marker, lowercase extension) take part in
// pairing. Matching is case-sensitive throughout.

use std::collections::BTreeMap;
use std::path::Path;

use scanpair_core::error::Result;
use scanpair_core::types::{ImageFile, Pair, Side};
use tracing::{debug, instrument};

/// Extensions considered during directory discovery.
pub const DISCOVERY_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

const FRONT_SUFFIX: &str = "F.jpg";
const BACK_SUFFIX: &str = "B.jpg";

/// Classification of one filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanName<'a> {
    Front(&'a str),
    Back(&'a str),
    Unrecognized,
}

impl ScanName<'_> {
    fn into_image_file(self, file_name: &str) -> Option<ImageFile> {
        match self {
            Self::Front(base) => Some(ImageFile::new(file_name, base, Side::Front)),
            Self::Back(base) => Some(ImageFile::new(file_name, base, Side::Back)),
            Self::Unrecognized => None,
        }
    }
}

/// Whether `file_name` ends in one of the discovery extensions.
pub fn is_discoverable(file_name: &str) -> bool {
    DISCOVERY_EXTENSIONS
        .iter()
        .any(|ext| file_name.ends_with(ext))
}

/// Parse a filename into its side and base identifier.
///
/// The base may be empty: `F.jpg` is the front of base `""`.
pub fn classify(file_name: &str) -> ScanName<'_> {
    if let Some(base) = file_name.strip_suffix(FRONT_SUFFIX) {
        ScanName::Front(base)
    } else if let Some(base) = file_name.strip_suffix(BACK_SUFFIX) {
        ScanName::Back(base)
    } else {
        ScanName::Unrecognized
    }
}

/// Group filenames into pairs by base identifier.
///
/// Every base with at least one recognised side appears in the result;
/// bases with a single side stay in as incomplete pairs. The map iterates in
/// ascending base order.
pub fn match_pairs<I, S>(file_names: I) -> BTreeMap<String, Pair>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    file_names
        .into_iter()
        .filter(|name| is_discoverable(name.as_ref()))
        .filter_map(|name| {
            let name = name.as_ref();
            classify(name).into_image_file(name)
        })
        .fold(BTreeMap::new(), |mut pairs, file| {
            let pair = pairs
                .remove(&file.base)
                .unwrap_or_else(|| Pair::new(file.base.clone()));
            pairs.insert(file.base.clone(), pair.with(file));
            pairs
        })
}

/// List the regular files directly inside `root` and match them into pairs.
///
/// Entries whose names are not valid UTF-8 are skipped.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn scan_directory(root: &Path) -> Result<BTreeMap<String, Pair>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!(name = ?raw, "skipping non UTF-8 filename"),
        }
    }

    let pairs = match_pairs(&names);
    debug!(files = names.len(), pairs = pairs.len(), "directory scanned");
    Ok(pairs)
}
