//! Exhaustive mode: scan every recognized text file for references.

use std::fs;
use std::path::Path;
use tracing::warn;

use crate::matcher::PatternSet;
use crate::model::TextMatch;
use crate::walker::walk_files;

/// File extensions read in exhaustive mode.
pub const SCANNED_EXTENSIONS: &[&str] = &["js", "json", "ts", "jsx", "tsx", "vue", "html", "md"];

fn has_scanned_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCANNED_EXTENSIONS.contains(&ext))
}

/// Scans the tree under `root` for lines referencing any pattern.
///
/// One record is emitted per (pattern, line) pair; a line mentioning a
/// pattern twice still yields a single record, while a line matching two
/// patterns yields two. Patterns are tested in caller order per file.
/// Unreadable files contribute zero matches and the scan continues.
pub fn scan_tree(root: &Path, patterns: &PatternSet) -> Vec<TextMatch> {
    let mut matches = Vec::new();

    walk_files(root, |path| {
        if !has_scanned_extension(path) {
            return;
        }
        matches.extend(scan_file(path, patterns));
    });

    matches
}

fn scan_file(path: &Path, patterns: &PatternSet) -> Vec<TextMatch> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!("failed to read {}: {}", path.display(), err);
            return Vec::new();
        }
    };

    let mut matches = Vec::new();
    for (pattern, regex) in patterns.iter() {
        for (index, line) in content.lines().enumerate() {
            if regex.is_match(line) {
                matches.push(TextMatch::new(
                    pattern,
                    path.to_path_buf(),
                    index as u64 + 1,
                    line,
                ));
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn patterns(names: &[&str]) -> PatternSet {
        let owned: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        PatternSet::compile(&owned).unwrap()
    }

    #[test]
    fn test_single_match_with_line_number() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "require('evil-pkg')\n").unwrap();

        let matches = scan_tree(dir.path(), &patterns(&["evil-pkg"]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].pattern, "evil-pkg");
        assert_eq!(matches[0].file, dir.path().join("a.js"));
        assert_eq!(matches[0].line, 1);
        assert_eq!(matches[0].content, "require('evil-pkg')");
    }

    #[test]
    fn test_line_granularity() {
        let dir = TempDir::new().unwrap();
        // Two references on one line: still one record for that line.
        fs::write(
            dir.path().join("a.js"),
            "import x from 'evil-pkg'; require('evil-pkg')\n",
        )
        .unwrap();

        let matches = scan_tree(dir.path(), &patterns(&["evil-pkg"]));
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_two_patterns_one_line() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "evil-pkg bad-pkg\n").unwrap();

        let matches = scan_tree(dir.path(), &patterns(&["evil-pkg", "bad-pkg"]));
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].pattern, "evil-pkg");
        assert_eq!(matches[1].pattern, "bad-pkg");
    }

    #[test]
    fn test_unrecognized_extensions_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.rs"), "evil-pkg\n").unwrap();
        fs::write(dir.path().join("a.txt"), "evil-pkg\n").unwrap();

        assert!(scan_tree(dir.path(), &patterns(&["evil-pkg"])).is_empty());
    }

    #[test]
    fn test_content_is_trimmed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "  evil-pkg was here  \n").unwrap();

        let matches = scan_tree(dir.path(), &patterns(&["evil-pkg"]));
        assert_eq!(matches[0].content, "evil-pkg was here");
    }

    #[test]
    fn test_node_modules_not_scanned() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/e.js"), "evil-pkg\n").unwrap();

        assert!(scan_tree(dir.path(), &patterns(&["evil-pkg"])).is_empty());
    }

    #[test]
    fn test_idempotent_over_unchanged_tree() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/a.js"), "evil-pkg\n").unwrap();
        fs::write(dir.path().join("b.js"), "evil-pkg\nbad-pkg\n").unwrap();

        let set = patterns(&["evil-pkg", "bad-pkg"]);
        assert_eq!(scan_tree(dir.path(), &set), scan_tree(dir.path(), &set));
    }
}
