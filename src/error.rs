use std::path::PathBuf;
use thiserror::Error;

/// Fatal pre-scan validation failures.
///
/// Everything that goes wrong *during* a scan (unreadable files,
/// malformed lock files) is recovered locally and logged; only these
/// conditions abort a run, because no meaningful scan can proceed.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("directory {0:?} does not exist")]
    MissingDirectory(PathBuf),

    #[error("{0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("no package names to search for")]
    EmptyPatternList,
}
