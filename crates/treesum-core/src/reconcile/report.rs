//! Counters produced by a verification pass

use serde::{Deserialize, Serialize};

use crate::config::VerifyOptions;

/// Outcome counters of one verification pass
///
/// Every non-ignored file on disk bumps exactly one of `verified`, `failed`
/// or `added`; every unmatched, non-ignored entry bumps `removed` once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    /// Existing files whose digest matched
    pub verified: usize,
    /// Existing files whose digest differed
    pub failed: usize,
    /// Files without an entry, whether or not they were recorded
    pub added: usize,
    /// Entries whose file is gone, whether or not they were dropped
    pub removed: usize,
    /// Entries matching the ignore list, whether or not they were dropped
    pub ignored: usize,
    /// Whether the database file was rewritten
    pub database_updated: bool,
}

impl VerifyReport {
    /// Whether changed files were written back to the store
    pub fn failed_updated(&self, options: &VerifyOptions) -> bool {
        self.failed > 0 && options.update_changed
    }

    /// Whether new files were recorded in the store
    pub fn added_updated(&self, options: &VerifyOptions) -> bool {
        self.added > 0 && options.add_new
    }

    /// Whether deleted files were dropped from the store
    pub fn removed_updated(&self, options: &VerifyOptions) -> bool {
        self.removed > 0 && options.remove_deleted
    }

    /// Whether ignored entries were dropped from the store
    pub fn ignored_updated(&self, options: &VerifyOptions) -> bool {
        self.ignored > 0 && options.clean_ignored
    }

    /// Whether the pass changed anything that must reach the database file
    pub fn requires_save(&self, options: &VerifyOptions) -> bool {
        self.failed_updated(options)
            || self.added_updated(options)
            || self.removed_updated(options)
            || self.ignored_updated(options)
    }

    /// Human-readable summary, one counter per line
    pub fn summary_lines(&self, options: &VerifyOptions) -> Vec<String> {
        let suffix = |updated: bool| if updated { " (database updated)" } else { "" };

        let mut lines = vec![
            format!("{} verified", self.verified),
            format!(
                "{} failed{}",
                self.failed,
                suffix(self.failed_updated(options))
            ),
            format!(
                "{} new files{}",
                self.added,
                suffix(self.added_updated(options))
            ),
            format!(
                "{} deleted files{}",
                self.removed,
                suffix(self.removed_updated(options))
            ),
        ];
        if options.clean_ignored {
            lines.push(format!(
                "{} ignored entries{}",
                self.ignored,
                suffix(self.ignored_updated(options))
            ));
        }
        lines
    }
}
