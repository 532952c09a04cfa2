//! Error types for treesum-core

use std::path::PathBuf;

use treesum_fs::Digest;

/// Result type for treesum-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in treesum-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A checksum database line does not have the `<digest>  <path>` layout
    #[error("Malformed checksum database {path} at line {line}: {reason}")]
    DataIntegrity {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A store path cannot be written to the line-oriented database
    #[error("Path {path:?} cannot be stored in a checksum database: {reason}")]
    UnrepresentablePath { path: String, reason: String },

    /// An ignore-list line is not a valid shell glob
    #[error("Invalid ignore pattern {pattern:?} in {path} at line {line}: {message}")]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        message: String,
    },

    /// A patch payload no longer matches the digest recorded for it
    #[error("Stale payload for {path}: database records {expected}, file hashes to {actual}")]
    StalePayload {
        path: String,
        expected: Digest,
        actual: Digest,
    },

    /// The patch container could not be written or read
    #[error("Patch archive error at {path}: {message}")]
    Archive { path: PathBuf, message: String },

    /// A patch archive entry does not follow the `<index>meta` / `<index>data` scheme
    #[error("Malformed patch entry {name}: {reason}")]
    MalformedPatch { name: String, reason: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from treesum-fs
    #[error(transparent)]
    Fs(#[from] treesum_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error reports corrupt or inconsistent data rather than an
    /// I/O failure.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Self::DataIntegrity { .. }
                | Self::UnrepresentablePath { .. }
                | Self::StalePayload { .. }
                | Self::MalformedPatch { .. }
        )
    }
}
