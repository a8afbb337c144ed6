//! Input discovery by file-name fragment.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IconError, IconResult};

/// Roots searched when none are given.
pub const DEFAULT_ROOTS: [&str; 3] = ["dist", "public", "."];

/// First regular file whose name contains `needle`, searching `roots` in order.
///
/// Roots that do not exist are skipped. Within a root, entries are checked in name
/// order so the result does not depend on directory iteration order.
pub fn find_by_name<P: AsRef<Path>>(roots: &[P], needle: &str) -> IconResult<PathBuf> {
    for root in roots {
        let root = root.as_ref();
        if !root.is_dir() {
            debug!(root = %root.display(), "skipping missing root");
            continue;
        }

        let entries = fs::read_dir(root)
            .map_err(|e| IconError::io("read directory", e).with_path(root))?;
        let mut names: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        names.sort();

        if let Some(found) = names.into_iter().find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.contains(needle))
        }) {
            return Ok(found);
        }
    }

    let searched: Vec<String> = roots
        .iter()
        .map(|r| r.as_ref().display().to_string())
        .collect();
    Err(IconError::asset(
        "find input",
        format!("no file containing '{}' under {}", needle, searched.join(", ")),
    ))
}
