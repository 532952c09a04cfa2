//! Verification of a tree against its checksum database
//!
//! A pass has two phases. The tree walk classifies every non-ignored file as
//! verified, failed or new and marks matched entries as seen. The sweep then
//! visits every entry once in store order: ignored entries are optionally
//! cleaned, and entries never seen belong to deleted files.

mod report;

pub use report::VerifyReport;

use std::path::Path;

use treesum_fs::checksum::compute_file_digest;
use treesum_fs::{TreeFile, TreeWalker};

use crate::Result;
use crate::config::VerifyOptions;
use crate::ignore::IgnoreMatcher;
use crate::store::ChecksumStore;

/// Runs verification passes over one tree
///
/// The reconciler only mutates the store it is handed; persisting is left
/// to the caller (see [`verify_tree`]).
pub struct Reconciler<'a> {
    root: &'a Path,
    ignore: &'a IgnoreMatcher,
    options: VerifyOptions,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler for the tree at `root`
    pub fn new(root: &'a Path, ignore: &'a IgnoreMatcher, options: VerifyOptions) -> Self {
        Self {
            root,
            ignore,
            options,
        }
    }

    /// Run one pass, mutating `store` according to the options
    ///
    /// # Errors
    ///
    /// Any walk or read failure aborts the pass. The store may then hold a
    /// partial update and must not be saved.
    pub fn reconcile(&self, store: &mut ChecksumStore) -> Result<VerifyReport> {
        let mut report = VerifyReport::default();
        store.reset_seen();

        for file in TreeWalker::new(self.root) {
            let file = file?;
            if self.ignore.matches(file.relative.as_str()) {
                tracing::trace!(path = %file.relative, "Ignored file");
                continue;
            }
            if store.contains(file.relative.as_str()) {
                self.check_existing(store, &file, &mut report)?;
            } else {
                self.check_new(store, &file, &mut report)?;
            }
        }

        self.sweep(store, &mut report);
        Ok(report)
    }

    fn check_existing(
        &self,
        store: &mut ChecksumStore,
        file: &TreeFile,
        report: &mut VerifyReport,
    ) -> Result<()> {
        let path = file.relative.as_str();

        if self.options.verify_existing {
            let actual = compute_file_digest(&file.absolute)?;
            if let Some(entry) = store.get_mut(path) {
                if entry.digest == actual {
                    tracing::debug!("Existing file {}... verified", path);
                    report.verified += 1;
                } else if self.options.update_changed {
                    tracing::info!("Existing file {} changed, digest updated", path);
                    entry.digest = actual;
                    report.failed += 1;
                } else {
                    tracing::warn!(
                        "Existing file {} failed verification (expected {}, found {})",
                        path,
                        entry.digest,
                        actual
                    );
                    report.failed += 1;
                }
            }
        } else {
            tracing::debug!("Existing file {}... skipped", path);
        }

        store.mark_seen(path);
        Ok(())
    }

    fn check_new(
        &self,
        store: &mut ChecksumStore,
        file: &TreeFile,
        report: &mut VerifyReport,
    ) -> Result<()> {
        let path = file.relative.as_str();

        if self.options.add_new {
            let digest = compute_file_digest(&file.absolute)?;
            store.set(path, digest);
            store.mark_seen(path);
            tracing::info!("New file {} added", path);
        } else {
            tracing::debug!("New file {}... skipped", path);
        }

        // Counts detection, not recording
        report.added += 1;
        Ok(())
    }

    fn sweep(&self, store: &mut ChecksumStore, report: &mut VerifyReport) {
        let options = &self.options;
        store.retain(|entry| {
            let path = entry.path.as_str();
            if self.ignore.matches(path) {
                report.ignored += 1;
                if options.clean_ignored {
                    tracing::info!("Ignored entry {} removed", path);
                    return false;
                }
                tracing::debug!("Ignored entry {}... skipped", path);
                return true;
            }

            if entry.seen {
                return true;
            }
            report.removed += 1;
            if options.remove_deleted {
                tracing::info!("Deleted file {} removed", path);
                false
            } else {
                tracing::debug!("Deleted file {}... skipped", path);
                true
            }
        });
    }
}

/// Verify `root` against the database at `database` and persist the result
///
/// The database is rewritten only when the pass changed something the
/// options allow to reach disk.
pub fn verify_tree(
    root: &Path,
    database: &Path,
    ignore: &IgnoreMatcher,
    options: VerifyOptions,
) -> Result<VerifyReport> {
    let mut store = ChecksumStore::load(database)?;
    let mut report = Reconciler::new(root, ignore, options).reconcile(&mut store)?;

    if report.requires_save(&options) {
        store.save(database)?;
        report.database_updated = true;
    }

    tracing::debug!(?report, "Verification pass complete");
    Ok(report)
}
