pub mod config;
pub mod error;
pub mod feed;
pub mod lockfile;
pub mod matcher;
pub mod model;
pub mod output;
pub mod report;
pub mod scanner;
pub mod walker;

pub use config::Config;
pub use error::ValidationError;
pub use matcher::PatternSet;
pub use model::{CheckMode, LockfileMatch, ScanOutcome, ScanReport, TextMatch};

use anyhow::Result;
use std::path::Path;

/// Runs one scan: validates the target, compiles the patterns, and
/// dispatches to the mode's entry point.
///
/// Per-file and per-subtree problems during the scan are recovered
/// locally and logged; only the pre-scan checks here are fatal.
///
/// # Errors
///
/// Returns [`ValidationError`] when `root` is missing or not a
/// directory, or when `patterns` is empty.
pub fn scan(root: &Path, patterns: &[String], mode: CheckMode) -> Result<ScanReport> {
    if !root.exists() {
        return Err(ValidationError::MissingDirectory(root.to_path_buf()).into());
    }
    if !root.is_dir() {
        return Err(ValidationError::NotADirectory(root.to_path_buf()).into());
    }
    if patterns.is_empty() {
        return Err(ValidationError::EmptyPatternList.into());
    }

    let pattern_set = PatternSet::compile(patterns)?;

    let outcome = match mode {
        CheckMode::Shallow => {
            ScanOutcome::Shallow(lockfile::check_lock_files(root, &pattern_set))
        }
        CheckMode::Exhaustive => {
            ScanOutcome::Exhaustive(scanner::scan_tree(root, &pattern_set))
        }
    };

    Ok(ScanReport::new(
        mode,
        root.to_path_buf(),
        pattern_set.len(),
        outcome,
    ))
}
