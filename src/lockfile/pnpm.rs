use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

use crate::matcher::PatternSet;
use crate::model::{LockfileMatch, PackageManager};

const SECTION: &str = "pnpm-lock.yaml";

pub struct PnpmParser;

/// A YAML mapping key that looks like a package specifier: word
/// characters, `/`, `@` and `-`, optionally quoted.
fn entry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^\s*['"]?([/@\w-]+)['"]?:"#).expect("static regex"))
}

/// A semver-looking value after the key's colon, e.g. `evil-pkg: 1.2.3`.
fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#":\s*(\d+\.\d+\.\d+\S*)"#).expect("static regex"))
}

impl super::LockfileParser for PnpmParser {
    fn name(&self) -> &'static str {
        "pnpm lock file"
    }

    fn manager(&self) -> PackageManager {
        PackageManager::Pnpm
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

        for line in content.lines() {
            let Some(captures) = entry_regex().captures(line) else {
                continue;
            };
            let package = captures[1].trim_start_matches('/');

            for pattern in patterns.matching(package) {
                let version = version_regex()
                    .captures(line)
                    .map(|c| c[1].to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                matches.push(LockfileMatch::new(pattern, package, version, SECTION));
            }
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lockfile::LockfileParser;
    use std::fs;
    use tempfile::TempDir;

    fn parse(content: &str, names: &[&str]) -> Vec<LockfileMatch> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pnpm-lock.yaml");
        fs::write(&path, content).unwrap();
        let owned: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        let patterns = PatternSet::compile(&owned).unwrap();
        PnpmParser.parse(&path, &patterns)
    }

    #[test]
    fn test_dependency_entry_with_version() {
        let matches = parse("dependencies:\n  evil-pkg: 1.2.3\n", &["evil-pkg"]);
        assert_eq!(
            matches,
            vec![LockfileMatch::new("evil-pkg", "evil-pkg", "1.2.3", "pnpm-lock.yaml")]
        );
    }

    #[test]
    fn test_quoted_scoped_key() {
        let matches = parse("  '@scope/evil-pkg': 2.0.0\n", &["evil-pkg"]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].package, "@scope/evil-pkg");
        assert_eq!(matches[0].version, "2.0.0");
    }

    #[test]
    fn test_leading_slash_stripped() {
        let matches = parse("  /evil-pkg:\n", &["evil-pkg"]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].package, "evil-pkg");
        assert_eq!(matches[0].version, "unknown");
    }

    #[test]
    fn test_version_with_qualifier() {
        let matches = parse("  evil-pkg: 1.2.3(react@18.2.0)\n", &["evil-pkg"]);
        assert_eq!(matches[0].version, "1.2.3(react@18.2.0)");
    }

    #[test]
    fn test_no_version_on_line_is_unknown() {
        let matches = parse("  evil-pkg:\n    specifier: ^1.0.0\n", &["evil-pkg"]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].version, "unknown");
    }

    #[test]
    fn test_unrelated_keys_ignored() {
        assert!(parse("lockfileVersion: '9.0'\n  harmless: 1.0.0\n", &["evil-pkg"]).is_empty());
    }

    #[test]
    fn test_unreadable_file_yields_nothing() {
        let patterns = PatternSet::compile(&["evil-pkg".to_string()]).unwrap();
        assert!(PnpmParser
            .parse(Path::new("/nonexistent/pnpm-lock.yaml"), &patterns)
            .is_empty());
    }
}
