//! Pass options and the optional settings file
//!
//! Defaults reproduce the classic behavior: verify existing files, record new
//! ones, and leave everything else as a report-only condition.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use treesum_fs::ConfigStore;

use crate::Result;

/// Toggles for a verification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyOptions {
    /// Hash files that already have an entry and compare digests
    pub verify_existing: bool,
    /// Record digests for files without an entry
    pub add_new: bool,
    /// Drop entries whose file is gone
    pub remove_deleted: bool,
    /// Overwrite the stored digest of a file that failed verification
    pub update_changed: bool,
    /// Drop entries whose path matches the ignore list
    pub clean_ignored: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            verify_existing: true,
            add_new: true,
            remove_deleted: false,
            update_changed: false,
            clean_ignored: false,
        }
    }
}

/// Toggles for patch generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Emit `add` operations for paths missing from the remote
    pub diff_new: bool,
    /// Emit `replace` operations for paths whose digests differ
    pub diff_changed: bool,
    /// Emit `delete` operations for remote paths missing locally
    pub diff_deleted: bool,
    /// Re-hash every payload and require it to match the local database
    pub verify_payload: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            diff_new: true,
            diff_changed: false,
            diff_deleted: false,
            verify_payload: false,
        }
    }
}

/// Contents of a settings file (`.toml`, `.json`, `.yaml`)
///
/// Every field is optional; missing ones take their defaults.
///
/// ```toml
/// ignore_file = "treesum.ignore"
///
/// [verify]
/// remove_deleted = true
///
/// [diff]
/// diff_changed = true
/// diff_deleted = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ignore list applied to both passes
    pub ignore_file: Option<PathBuf>,
    /// Verification pass toggles
    pub verify: VerifyOptions,
    /// Patch generation toggles
    pub diff: DiffOptions,
}

impl Settings {
    /// Load settings, detecting the format from the file extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let settings: Self = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }
}
