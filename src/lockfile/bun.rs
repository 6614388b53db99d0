use std::path::Path;
use tracing::warn;

use crate::matcher::PatternSet;
use crate::model::{LockfileMatch, PackageManager};

/// `bun.lockb` is a binary format with no parser here yet. Finding one
/// is reported as a notice and contributes zero matches; it is a known
/// capability gap, not a failure.
pub struct BunParser;

impl super::LockfileParser for BunParser {
    fn name(&self) -> &'static str {
        "bun lock file"
    }

    fn manager(&self) -> PackageManager {
        PackageManager::Bun
    }

    fn parse(&self, path: &Path, _patterns: &PatternSet) -> Vec<LockfileMatch> {
        warn!(
            "bun lockfile format not yet supported, skipping {}",
            path.display()
        );
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lockfile::LockfileParser;

    #[test]
    fn test_bun_contributes_no_matches() {
        let patterns = PatternSet::compile(&["evil-pkg".to_string()]).unwrap();
        assert!(BunParser
            .parse(Path::new("bun.lockb"), &patterns)
            .is_empty());
    }
}
