//! Counters produced by patch generation

use serde::{Deserialize, Serialize};

use super::operation::PatchOperation;
use crate::config::DiffOptions;

/// Outcome of one patch generation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// `add` operations emitted
    pub new: usize,
    /// `replace` operations emitted
    pub changed: usize,
    /// `delete` operations emitted
    pub deleted: usize,
    /// Every emitted operation in index order
    pub operations: Vec<PatchOperation>,
}

impl DiffReport {
    /// Total number of emitted operations
    pub fn total(&self) -> usize {
        self.operations.len()
    }

    /// Human-readable summary covering the enabled operation kinds
    pub fn summary_lines(&self, options: &DiffOptions) -> Vec<String> {
        let mut lines = Vec::new();
        if options.diff_new {
            lines.push(format!("{} new files will be added", self.new));
        }
        if options.diff_changed {
            lines.push(format!("{} existing files will be updated", self.changed));
        }
        if options.diff_deleted {
            lines.push(format!("{} deleted files will be removed", self.deleted));
        }
        lines
    }
}
