use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// The lock file name this manager writes.
    pub fn lock_file_name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Yarn => "yarn.lock",
            PackageManager::Pnpm => "pnpm-lock.yaml",
            PackageManager::Bun => "bun.lockb",
        }
    }

    /// Maps a lock file name back to its manager, if recognized.
    pub fn from_lock_file_name(name: &str) -> Option<Self> {
        match name {
            "package-lock.json" => Some(PackageManager::Npm),
            "yarn.lock" => Some(PackageManager::Yarn),
            "pnpm-lock.yaml" => Some(PackageManager::Pnpm),
            "bun.lockb" => Some(PackageManager::Bun),
            _ => None,
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which scan the caller selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Check package-manager lock files only (resolved dependency graph).
    Shallow,
    /// Scan every recognized text file for literal references.
    Exhaustive,
}

impl CheckMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckMode::Shallow => "shallow",
            CheckMode::Exhaustive => "exhaustive",
        }
    }
}

impl std::fmt::Display for CheckMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A lock file discovered somewhere in the scanned tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockfileDescriptor {
    pub path: PathBuf,
    pub manager: PackageManager,
    pub file_name: String,
}

impl LockfileDescriptor {
    pub fn new(path: PathBuf, manager: PackageManager) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            manager,
            file_name,
        }
    }
}

/// A compromised-package hit inside a lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockfileMatch {
    /// The pattern (package name) that matched.
    pub pattern: String,
    /// Resolved package name, manager qualifiers stripped.
    pub package: String,
    /// Resolved version, or "unknown" when the lock file did not say.
    pub version: String,
    /// Where in the lock file the hit came from ("dependencies",
    /// "packages", or the lock file name for line-oriented formats).
    pub section: String,
}

impl LockfileMatch {
    pub fn new(
        pattern: impl Into<String>,
        package: impl Into<String>,
        version: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            package: package.into(),
            version: version.into(),
            section: section.into(),
        }
    }
}

/// A compromised-package reference found in a source/text file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMatch {
    /// The pattern (package name) that matched.
    pub pattern: String,
    pub file: PathBuf,
    /// 1-based line number.
    pub line: u64,
    /// The matching line, trimmed.
    pub content: String,
}

impl TextMatch {
    pub fn new(pattern: impl Into<String>, file: PathBuf, line: u64, content: &str) -> Self {
        Self {
            pattern: pattern.into(),
            file,
            line,
            content: content.trim().to_string(),
        }
    }
}
