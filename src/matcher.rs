//! Whole-word, case-insensitive package-name matching.
//!
//! Patterns are package names, not regexes: each one is escaped and
//! wrapped in word boundaries before compilation, so `lodash` matches
//! `LODASH` and `lodash-es` (`-` is a word boundary) but not `mylodash`.
//!
//! Scoped names inherit regex word-boundary semantics: a leading `@`
//! sits next to a non-word character, so a pattern like `@ctrl/tinycolor`
//! will not match at the start of a string. Feeds therefore list scoped
//! packages by their bare name.

use anyhow::{Context, Result};
use regex::Regex;

struct PatternEntry {
    raw: String,
    regex: Regex,
}

/// A compiled set of package-name patterns, preserving caller order.
pub struct PatternSet {
    entries: Vec<PatternEntry>,
}

impl PatternSet {
    /// Compiles every pattern as a literal whole-word, case-insensitive
    /// regex. Pattern order is preserved.
    pub fn compile(patterns: &[String]) -> Result<Self> {
        let mut entries = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(pattern)))
                .with_context(|| format!("failed to compile pattern {:?}", pattern))?;
            entries.push(PatternEntry {
                raw: pattern.clone(),
                regex,
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over (pattern, compiled regex) pairs in caller order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Regex)> {
        self.entries.iter().map(|e| (e.raw.as_str(), &e.regex))
    }

    /// Yields every pattern that matches `candidate`, in caller order.
    pub fn matching<'a>(&'a self, candidate: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |e| e.regex.is_match(candidate))
            .map(|e| e.raw.as_str())
    }
}
