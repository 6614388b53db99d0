//! Shallow mode: lock-file location and per-format parsing.
//!
//! This module provides the [`LockfileParser`] trait and implementations
//! for each recognized package manager.
//!
//! # Supported lock files
//!
//! | File | Manager | Support |
//! |------|---------|---------|
//! | `package-lock.json` | npm | full |
//! | `yarn.lock` | yarn | full |
//! | `pnpm-lock.yaml` | pnpm | full |
//! | `bun.lockb` | bun | unsupported (binary format) |
//!
//! # Example
//!
//! ```no_run
//! use depsweep::lockfile::{check_lock_files, find_lock_files};
//! use depsweep::matcher::PatternSet;
//! use std::path::Path;
//!
//! let patterns = PatternSet::compile(&["evil-pkg".to_string()])?;
//! for lock in find_lock_files(Path::new(".")) {
//!     println!("{} ({})", lock.path.display(), lock.manager);
//! }
//! let matches = check_lock_files(Path::new("."), &patterns);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod bun;
mod npm;
mod pnpm;
mod yarn;

pub use bun::BunParser;
pub use npm::NpmParser;
pub use pnpm::PnpmParser;
pub use yarn::YarnParser;

use std::path::Path;

use crate::matcher::PatternSet;
use crate::model::{LockfileDescriptor, LockfileMatch, PackageManager};
use crate::walker::walk_files;

/// Trait for extracting compromised-package matches from one lock-file
/// format.
///
/// Parsers never fail the run: unreadable or malformed input is logged
/// and contributes zero matches, so remaining lock files are still
/// checked.
pub trait LockfileParser {
    /// Human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// The package manager whose lock files this parser understands.
    fn manager(&self) -> PackageManager;

    /// Parses the lock file at `path` and returns every pattern hit.
    fn parse(&self, path: &Path, patterns: &PatternSet) -> Vec<LockfileMatch>;
}

/// Returns the parser for a package manager's lock-file format.
pub fn parser_for(manager: PackageManager) -> Box<dyn LockfileParser> {
    match manager {
        PackageManager::Npm => Box::new(NpmParser),
        PackageManager::Yarn => Box::new(YarnParser),
        PackageManager::Pnpm => Box::new(PnpmParser),
        PackageManager::Bun => Box::new(BunParser),
    }
}

/// Finds every recognized lock file under `root`, at any depth.
///
/// Multiple lock files of the same or different kinds in nested
/// subdirectories are all returned, in traversal order.
pub fn find_lock_files(root: &Path) -> Vec<LockfileDescriptor> {
    let mut lock_files = Vec::new();

    walk_files(root, |path| {
        let manager = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(PackageManager::from_lock_file_name);

        if let Some(manager) = manager {
            lock_files.push(LockfileDescriptor::new(path.to_path_buf(), manager));
        }
    });

    lock_files
}

/// Shallow-mode entry point: locates every lock file under `root` and
/// runs the matching parser over each one.
pub fn check_lock_files(root: &Path, patterns: &PatternSet) -> Vec<LockfileMatch> {
    let mut matches = Vec::new();

    for lock_file in find_lock_files(root) {
        let parser = parser_for(lock_file.manager);
        matches.extend(parser.parse(&lock_file.path, patterns));
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_lock_files_all_kinds() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-lock.json"), "{}").unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/pnpm-lock.yaml"), "").unwrap();
        fs::write(dir.path().join("sub/bun.lockb"), "").unwrap();

        let found = find_lock_files(dir.path());
        let managers: Vec<PackageManager> = found.iter().map(|l| l.manager).collect();
        assert_eq!(
            managers,
            vec![
                PackageManager::Npm,
                PackageManager::Bun,
                PackageManager::Pnpm,
                PackageManager::Yarn,
            ]
        );
        assert_eq!(found[0].file_name, "package-lock.json");
    }

    #[test]
    fn test_find_lock_files_skips_node_modules() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/package-lock.json"), "{}").unwrap();

        assert!(find_lock_files(dir.path()).is_empty());
    }

    #[test]
    fn test_parser_for_covers_every_manager() {
        for manager in [
            PackageManager::Npm,
            PackageManager::Yarn,
            PackageManager::Pnpm,
            PackageManager::Bun,
        ] {
            assert_eq!(parser_for(manager).manager(), manager);
        }
    }

    #[test]
    fn test_check_lock_files_aggregates_across_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package-lock.json"),
            r#"{"packages":{"node_modules/evil-pkg":{"version":"1.2.3"}}}"#,
        )
        .unwrap();
        fs::create_dir(dir.path().join("app")).unwrap();
        fs::write(
            dir.path().join("app/yarn.lock"),
            "evil-pkg@^1.0.0:\n  version \"1.2.3\"\n",
        )
        .unwrap();

        let patterns = PatternSet::compile(&["evil-pkg".to_string()]).unwrap();
        let matches = check_lock_files(dir.path(), &patterns);
        // "app" sorts before "package-lock.json", so yarn matches come first.
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].section, "yarn.lock");
        assert_eq!(matches[1].section, "packages");
    }
}
