//! Grouping of match records for presentation.

use crate::model::{LockfileMatch, TextMatch};

/// A record that carries the pattern it matched.
pub trait Matched {
    fn pattern(&self) -> &str;
}

impl Matched for LockfileMatch {
    fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Matched for TextMatch {
    fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// All records for one matched pattern.
pub struct PatternGroup<'a, T> {
    pub pattern: &'a str,
    pub records: Vec<&'a T>,
}

/// Groups records by matched pattern: groups appear in first-seen
/// order, records keep their insertion order within a group. No
/// filtering or deduplication happens here; identical records stay
/// distinct.
pub fn group_by_pattern<T: Matched>(records: &[T]) -> Vec<PatternGroup<'_, T>> {
    let mut groups: Vec<PatternGroup<'_, T>> = Vec::new();

    for record in records {
        match groups.iter_mut().find(|g| g.pattern == record.pattern()) {
            Some(group) => group.records.push(record),
            None => groups.push(PatternGroup {
                pattern: record.pattern(),
                records: vec![record],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lock(pattern: &str, section: &str) -> LockfileMatch {
        LockfileMatch::new(pattern, pattern, "1.0.0", section)
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let records = vec![
            lock("b-pkg", "packages"),
            lock("a-pkg", "packages"),
            lock("b-pkg", "dependencies"),
        ];

        let groups = group_by_pattern(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].pattern, "b-pkg");
        assert_eq!(groups[1].pattern, "a-pkg");
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[0].records[0].section, "packages");
        assert_eq!(groups[0].records[1].section, "dependencies");
    }

    #[test]
    fn test_duplicates_preserved() {
        let records = vec![lock("a-pkg", "packages"), lock("a-pkg", "packages")];
        let groups = group_by_pattern(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].records.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<TextMatch> = Vec::new();
        assert!(group_by_pattern(&records).is_empty());
    }
}
