use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{CheckMode, LockfileMatch, TextMatch};

/// The match records produced by one scan. The two modes never mix
/// within a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOutcome {
    Shallow(Vec<LockfileMatch>),
    Exhaustive(Vec<TextMatch>),
}

impl ScanOutcome {
    pub fn len(&self) -> usize {
        match self {
            ScanOutcome::Shallow(m) => m.len(),
            ScanOutcome::Exhaustive(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Complete results of one scan invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub mode: CheckMode,
    pub root: PathBuf,
    /// How many patterns were searched for.
    pub pattern_count: usize,
    pub outcome: ScanOutcome,
    pub scan_time: DateTime<Utc>,
}

impl ScanReport {
    pub fn new(mode: CheckMode, root: PathBuf, pattern_count: usize, outcome: ScanOutcome) -> Self {
        Self {
            mode,
            root,
            pattern_count,
            outcome,
            scan_time: Utc::now(),
        }
    }
}
