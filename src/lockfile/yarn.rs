use std::fs;
use std::path::Path;
use tracing::warn;

use crate::matcher::PatternSet;
use crate::model::{LockfileMatch, PackageManager};

const SECTION: &str = "yarn.lock";

pub struct YarnParser;

/// Line-oriented parse state. A package header arms the machine; the
/// first following `version` line emits and disarms it, so stray extra
/// `version` lines or malformed blocks never leak a stale package name.
enum ParseState {
    AwaitingKey,
    AwaitingVersion(String),
}

impl super::LockfileParser for YarnParser {
    fn name(&self) -> &'static str {
        "yarn lock file"
    }

    fn manager(&self) -> PackageManager {
        PackageManager::Yarn
    }

    fn parse(&self, path: &Path, patterns: &PatternSet) -> Vec<LockfileMatch> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("failed to read {}: {}", path.display(), err);
                return Vec::new();
            }
        };

        let mut matches = Vec::new();
        let mut state = ParseState::AwaitingKey;

        for line in content.lines() {
            if let Some(package) = header_package(line) {
                state = ParseState::AwaitingVersion(package);
                continue;
            }

            if let Some(version) = version_value(line) {
                if let ParseState::AwaitingVersion(package) = &state {
                    for pattern in patterns.matching(package) {
                        matches.push(LockfileMatch::new(pattern, package, &version, SECTION));
                    }
                    state = ParseState::AwaitingKey;
                }
            }
            // Anything else (comments, integrity lines, blanks) leaves
            // the state alone.
        }

        matches
    }
}

/// Extracts the package name from an unindented `name@range:` header
/// line, or `None` if the line is not a header.
fn header_package(line: &str) -> Option<String> {
    let first = line.chars().next()?;
    if first.is_whitespace() || first == '#' {
        return None;
    }

    let keys = line.trim_end().strip_suffix(':')?;
    // Headers may list several selectors: `"a@^1.0.0", "a@^1.2.0":`.
    let selector = keys.split(',').next()?.trim().trim_matches(['"', '\'']);
    if selector.is_empty() {
        return None;
    }

    // Strip the version range after `@`, keeping a leading `@scope/`.
    let name = match selector.char_indices().skip(1).find(|&(_, c)| c == '@') {
        Some((at, _)) => &selector[..at],
        None => selector,
    };

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Extracts `X` from an indented `version "X"` line.
fn version_value(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix("version ")?;
    let version = rest.trim().trim_matches(['"', '\'']);
    if version.is_empty() {
        Some("unknown".to_string())
    } else {
        Some(version.to_string())
    }
}
