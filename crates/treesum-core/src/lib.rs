//! Checksum database engine for treesum
//!
//! This crate provides:
//!
//! - **ChecksumStore**: the ordered path to digest database and its text format
//! - **IgnoreMatcher**: shell-glob ignore lists
//! - **Reconciler**: verification of a tree against its database
//! - **PatchGenerator**: patches that bring a remote tree in line with a local one
//!
//! # Architecture
//!
//! ```text
//!                  treesum-cli
//!                       |
//!                  treesum-core
//!        +------+-------+--------+---------+
//!        |      |       |        |         |
//!      store  ignore  reconcile  patch   config
//!                       |
//!                   treesum-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use treesum_core::{IgnoreMatcher, VerifyOptions, verify_tree};
//!
//! fn example() -> treesum_core::Result<()> {
//!     let ignore = IgnoreMatcher::load(None)?;
//!     let report = verify_tree(
//!         Path::new("data"),
//!         Path::new("checksums"),
//!         &ignore,
//!         VerifyOptions::default(),
//!     )?;
//!     println!("{} verified, {} failed", report.verified, report.failed);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ignore;
pub mod patch;
pub mod reconcile;
pub mod store;

pub use config::{DiffOptions, Settings, VerifyOptions};
pub use error::{Error, Result};
pub use ignore::IgnoreMatcher;
pub use patch::{
    ArchiveWriter, DiffReport, ManifestEntry, MemoryArchive, PatchGenerator, PatchKind,
    PatchOperation, ZipArchiveWriter, generate_patch, read_manifest,
};
pub use reconcile::{Reconciler, VerifyReport, verify_tree};
pub use store::{ChecksumEntry, ChecksumStore};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn data_integrity_error_displays_location() {
        let error = Error::DataIntegrity {
            path: PathBuf::from("/data/checksums"),
            line: 7,
            reason: "missing two-space separator after digest".into(),
        };

        let display = error.to_string();
        assert!(display.contains("/data/checksums"), "got: {display}");
        assert!(display.contains("line 7"), "got: {display}");
        assert!(error.is_data_integrity());
    }

    #[test]
    fn io_errors_are_not_data_integrity() {
        let error = Error::from(std::io::Error::other("boom"));
        assert!(!error.is_data_integrity());
    }
}
