//! Core data types for lock files, match records, and scan reports.
//!
//! This module contains the fundamental types used throughout depsweep:
//!
//! - [`PackageManager`] - The package manager a lock file belongs to
//! - [`LockfileDescriptor`] - A lock file discovered in the tree
//! - [`LockfileMatch`] / [`TextMatch`] - Match records for the two scan modes
//! - [`CheckMode`] - Shallow (lock files) vs. exhaustive (all text files)
//! - [`ScanReport`] - Complete scan results
//!
//! # Example
//!
//! ```
//! use depsweep::model::LockfileMatch;
//!
//! let m = LockfileMatch::new("lodash", "lodash", "4.17.21", "packages");
//! assert_eq!(m.pattern, "lodash");
//! ```

mod record;
mod report;

pub use record::*;
pub use report::*;
