//! Shared directory traversal for both scan modes.
//!
//! Both the lock-file locator and the text scanner walk the tree the
//! same way: depth-first, never descending into `node_modules` or any
//! entry whose name starts with `.`. Unreadable directories are logged
//! and skipped; sibling subtrees are still visited.

use std::ffi::OsStr;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Directory/file names that are never scanned or descended into.
pub fn is_excluded_name(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name == "node_modules" || name.starts_with('.')
}

/// Walks `root` depth-first and calls `visit` for every regular file
/// that survives the exclusion filter.
///
/// Children of each directory are visited in file-name order, so two
/// runs over an unchanged tree yield files in the same order. Symlinks
/// are not followed.
pub fn walk_files(root: &Path, mut visit: impl FnMut(&Path)) {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        // The root itself is always entered, whatever it is named.
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded_name(entry.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };

        if entry.file_type().is_file() {
            visit(entry.path());
        }
    }
}
