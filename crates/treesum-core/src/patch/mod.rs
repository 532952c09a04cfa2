//! Patch generation
//!
//! Compares a local checksum database (backed by an accessible tree) with a
//! remote one and writes the operations that would bring the remote tree in
//! line with the local tree.
//!
//! Indices are assigned in local-store order first, then remote-store order,
//! starting at 0 and increasing by one per operation. Every operation writes
//! `<index>meta`; `add` and `replace` also write `<index>data` holding the
//! local file content.

mod archive;
mod operation;
mod report;

pub use archive::{ArchiveWriter, ManifestEntry, MemoryArchive, ZipArchiveWriter, read_manifest};
pub use operation::{PatchKind, PatchOperation};
pub use report::DiffReport;

use std::fs;
use std::path::Path;

use treesum_fs::NormalizedPath;
use treesum_fs::checksum::compute_content_digest;

use crate::config::DiffOptions;
use crate::ignore::IgnoreMatcher;
use crate::store::{ChecksumEntry, ChecksumStore};
use crate::{Error, Result};

/// Generates patches for one local tree
pub struct PatchGenerator<'a> {
    local_root: &'a Path,
    ignore: &'a IgnoreMatcher,
    options: DiffOptions,
}

impl<'a> PatchGenerator<'a> {
    /// Create a generator reading payloads from `local_root`
    pub fn new(local_root: &'a Path, ignore: &'a IgnoreMatcher, options: DiffOptions) -> Self {
        Self {
            local_root,
            ignore,
            options,
        }
    }

    /// Compare the stores and write operations to `archive`
    ///
    /// `remote` has its `seen` flags rewritten; its entries are untouched.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable payload, stale payload (when
    /// `verify_payload` is set) or archive write error. The archive is not
    /// finalized here; see [`generate_patch`].
    pub fn generate<W: ArchiveWriter + ?Sized>(
        &self,
        local: &ChecksumStore,
        remote: &mut ChecksumStore,
        archive: &mut W,
    ) -> Result<DiffReport> {
        let mut report = DiffReport::default();
        remote.reset_seen();

        for entry in local.iter() {
            if self.ignore.matches(&entry.path) {
                continue;
            }
            let remote_digest = remote.get(&entry.path).map(|r| r.digest.clone());
            match remote_digest {
                Some(remote_digest) => {
                    remote.mark_seen(&entry.path);
                    if !self.options.diff_changed {
                        tracing::debug!("Existing file {}... skipped", entry.path);
                    } else if remote_digest == entry.digest {
                        tracing::debug!("Existing file {}... unchanged", entry.path);
                    } else {
                        self.emit_with_payload(archive, &mut report, PatchKind::Replace, entry)?;
                        report.changed += 1;
                        tracing::info!("Existing file {} changed", entry.path);
                    }
                }
                None if self.options.diff_new => {
                    self.emit_with_payload(archive, &mut report, PatchKind::Add, entry)?;
                    report.new += 1;
                    tracing::info!("New file {} added", entry.path);
                }
                None => tracing::debug!("New file {}... skipped", entry.path),
            }
        }

        for entry in remote.iter() {
            if self.ignore.matches(&entry.path) || entry.seen {
                continue;
            }
            if self.options.diff_deleted {
                let operation = next_operation(&report, PatchKind::Delete, &entry.path);
                archive.append(&operation.meta_name(), &operation.meta_bytes())?;
                report.operations.push(operation);
                report.deleted += 1;
                tracing::info!("Deleted file {} removed", entry.path);
            } else {
                tracing::debug!("Deleted file {}... skipped", entry.path);
            }
        }

        Ok(report)
    }

    fn emit_with_payload<W: ArchiveWriter + ?Sized>(
        &self,
        archive: &mut W,
        report: &mut DiffReport,
        kind: PatchKind,
        entry: &ChecksumEntry,
    ) -> Result<()> {
        let source = NormalizedPath::new(&entry.path).resolve(self.local_root);
        let payload = fs::read(&source).map_err(|e| treesum_fs::Error::io(&source, e))?;

        if self.options.verify_payload {
            let actual = compute_content_digest(&payload);
            if actual != entry.digest {
                return Err(Error::StalePayload {
                    path: entry.path.clone(),
                    expected: entry.digest.clone(),
                    actual,
                });
            }
        }

        let operation = next_operation(report, kind, &entry.path);
        archive.append(&operation.meta_name(), &operation.meta_bytes())?;
        archive.append(&operation.data_name(), &payload)?;
        report.operations.push(operation);
        Ok(())
    }
}

fn next_operation(report: &DiffReport, kind: PatchKind, path: &str) -> PatchOperation {
    PatchOperation::new(report.operations.len(), kind, path)
}

/// Generate a patch file at `patch_path`
///
/// The zip container is finalized whether or not generation succeeds, so a
/// failed pass still leaves a readable (partial) archive behind. A generation
/// error takes precedence over a finalization error.
pub fn generate_patch(
    local: &ChecksumStore,
    remote: &mut ChecksumStore,
    local_root: &Path,
    patch_path: &Path,
    ignore: &IgnoreMatcher,
    options: DiffOptions,
) -> Result<DiffReport> {
    let mut writer = ZipArchiveWriter::create(patch_path)?;
    let outcome = PatchGenerator::new(local_root, ignore, options).generate(local, remote, &mut writer);
    let finished = writer.finish();

    let report = outcome?;
    finished?;
    tracing::debug!(operations = report.total(), "Patch generation complete");
    Ok(report)
}
