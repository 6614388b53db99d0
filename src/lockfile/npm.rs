use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::matcher::PatternSet;
use crate::model::{LockfileMatch, PackageManager};

pub struct NpmParser;

/// The two dependency maps a `package-lock.json` may carry: the legacy
/// v1 `dependencies` map and the v2+ `packages` map whose keys are
/// installation paths (`node_modules/<name>`).
#[derive(Deserialize)]
struct NpmLockfile {
    dependencies: Option<BTreeMap<String, NpmEntry>>,
    packages: Option<BTreeMap<String, NpmEntry>>,
}

#[derive(Deserialize)]
struct NpmEntry {
    version: Option<String>,
}

impl super::LockfileParser for NpmParser {
    fn name(&self) -> &'static str {
        "npm lock file"
    }

    fn manager(&self) -> PackageManager {
        PackageManager::Npm
    }

    fn parse(&self, path: &Path, patterns: &PatternSet) -> Vec<LockfileMatch> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("failed to read {}: {}", path.display(), err);
                return Vec::new();
            }
        };

        let lockfile: NpmLockfile = match serde_json::from_str(&content) {
            Ok(lockfile) => lockfile,
            Err(err) => {
                warn!("malformed npm lock file {}: {}", path.display(), err);
                return Vec::new();
            }
        };

        let mut matches = Vec::new();
        check_map(&lockfile.dependencies, "dependencies", patterns, &mut matches);
        check_map(&lockfile.packages, "packages", patterns, &mut matches);
        matches
    }
}

fn check_map(
    entries: &Option<BTreeMap<String, NpmEntry>>,
    section: &str,
    patterns: &PatternSet,
    matches: &mut Vec<LockfileMatch>,
) {
    let Some(entries) = entries else {
        return;
    };

    for (key, entry) in entries {
        let package = key.strip_prefix("node_modules/").unwrap_or(key);
        let version = entry.version.as_deref().unwrap_or("unknown");

        for pattern in patterns.matching(package) {
            matches.push(LockfileMatch::new(pattern, package, version, section));
        }
    }
}
