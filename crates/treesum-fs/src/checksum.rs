//! MD5 content digests
//!
//! Provides the single digest format used by checksum databases: 128 bits
//! rendered as 32 lowercase hex characters.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Width of a rendered digest in characters
pub const DIGEST_WIDTH: usize = 32;

/// Reason a string was rejected as a digest
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDigest {
    #[error("expected {DIGEST_WIDTH} hex characters, found {found}")]
    Width { found: usize },

    #[error("non-hex character {found:?} in digest")]
    NonHex { found: char },
}

/// A validated, fixed-width content digest.
///
/// Always [`DIGEST_WIDTH`] lowercase ASCII hex characters. Uppercase input is
/// accepted and folded to lowercase, so it compares equal to computed digests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Validate `s` as a digest.
    pub fn parse(s: &str) -> std::result::Result<Self, InvalidDigest> {
        let found = s.chars().count();
        if found != DIGEST_WIDTH {
            return Err(InvalidDigest::Width { found });
        }
        if let Some(bad) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(InvalidDigest::NonHex { found: bad });
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// The rendered hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Digest {
    type Error = InvalidDigest;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

/// Compute the digest of an in-memory byte slice.
pub fn compute_content_digest(content: &[u8]) -> Digest {
    Digest(format!("{:x}", md5::compute(content)))
}

/// Compute the digest of a file's entire contents.
///
/// The file is read in one bulk read sized from its metadata. A zero-length
/// file never reaches the read and yields the digest of the empty sequence.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn compute_file_digest(path: &Path) -> Result<Digest> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let len = file.metadata().map_err(|e| Error::io(path, e))?.len();
    if len == 0 {
        return Ok(compute_content_digest(&[]));
    }

    let mut content = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
    file.read_to_end(&mut content)
        .map_err(|e| Error::io(path, e))?;
    Ok(compute_content_digest(&content))
}
