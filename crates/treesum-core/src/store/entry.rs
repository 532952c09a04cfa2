//! A single checksum database record

use serde::{Deserialize, Serialize};
use treesum_fs::Digest;

/// One path's recorded digest plus per-pass bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumEntry {
    /// Path relative to the tree root, `/`-separated
    pub path: String,
    /// Last recorded content digest
    pub digest: Digest,
    /// Whether the current pass has encountered this path.
    ///
    /// Never persisted; every load starts with `false`.
    #[serde(skip)]
    pub seen: bool,
}

impl ChecksumEntry {
    /// Create an entry that has not been seen in the current pass
    pub fn new(path: impl Into<String>, digest: Digest) -> Self {
        Self {
            path: path.into(),
            digest,
            seen: false,
        }
    }

    /// Render the entry as a database line, without terminator
    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.digest, super::SEPARATOR, self.path)
    }
}
