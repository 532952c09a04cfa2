//! Patch containers
//!
//! A patch is a sequence of named byte blobs. [`ArchiveWriter`] is the seam
//! the generator writes through; [`ZipArchiveWriter`] is the on-disk deflate
//! container and [`MemoryArchive`] keeps blobs in memory.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::operation::{EntryRole, PatchOperation};
use crate::{Error, Result};

/// Sequential writer of named blobs
pub trait ArchiveWriter {
    /// Append one blob under `name`
    fn append(&mut self, name: &str, content: &[u8]) -> Result<()>;
}

/// Deflate-compressed zip file holding a patch
pub struct ZipArchiveWriter {
    path: PathBuf,
    zip: ZipWriter<File>,
    entries: usize,
}

impl ZipArchiveWriter {
    /// Create (or truncate) the archive at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| treesum_fs::Error::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            zip: ZipWriter::new(file),
            entries: 0,
        })
    }

    /// Write the central directory and close the file
    ///
    /// Must run on every path out of a generation pass, including failures,
    /// so that whatever was written remains a readable archive.
    pub fn finish(self) -> Result<()> {
        let file = self.zip.finish().map_err(|e| Error::Archive {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        file.sync_all()
            .map_err(|e| treesum_fs::Error::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), entries = self.entries, "Patch archive finalized");
        Ok(())
    }

    fn archive_error(&self, e: impl std::fmt::Display) -> Error {
        Error::Archive {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}

impl ArchiveWriter for ZipArchiveWriter {
    fn append(&mut self, name: &str, content: &[u8]) -> Result<()> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .large_file(content.len() as u64 >= u64::from(u32::MAX));
        self.zip
            .start_file(name, options)
            .map_err(|e| self.archive_error(e))?;
        self.zip
            .write_all(content)
            .map_err(|e| self.archive_error(e))?;
        self.entries += 1;
        Ok(())
    }
}

/// In-memory blob list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryArchive {
    entries: Vec<(String, Vec<u8>)>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blobs in append order
    pub fn entries(&self) -> &[(String, Vec<u8>)] {
        &self.entries
    }

    /// Blob names in append order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Content of the blob called `name`
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_slice())
    }
}

impl ArchiveWriter for MemoryArchive {
    fn append(&mut self, name: &str, content: &[u8]) -> Result<()> {
        self.entries.push((name.to_string(), content.to_vec()));
        Ok(())
    }
}

/// One operation listed from an existing patch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(flatten)]
    pub operation: PatchOperation,
    /// Uncompressed payload size, absent for deletions
    pub payload_len: Option<u64>,
}

/// List the operations of a patch archive in index order
///
/// Checks the structural rules every patch obeys: each index has a meta
/// blob, indices run from 0 without gaps, and a data blob exists exactly
/// for operations that carry content.
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    let file = File::open(path).map_err(|e| treesum_fs::Error::io(path, e))?;
    let archive_error = |e: zip::result::ZipError| Error::Archive {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut zip = ZipArchive::new(file).map_err(archive_error)?;

    let mut metas: BTreeMap<usize, PatchOperation> = BTreeMap::new();
    let mut payloads: BTreeMap<usize, u64> = BTreeMap::new();
    for i in 0..zip.len() {
        let mut blob = zip.by_index(i).map_err(archive_error)?;
        let name = blob.name().to_string();
        match EntryRole::parse(&name)? {
            EntryRole::Meta(index) => {
                let mut bytes = Vec::new();
                blob.read_to_end(&mut bytes)
                    .map_err(|e| treesum_fs::Error::io(path, e))?;
                metas.insert(index, PatchOperation::parse_meta(index, &bytes)?);
            }
            EntryRole::Data(index) => {
                payloads.insert(index, blob.size());
            }
        }
    }

    let mut manifest = Vec::with_capacity(metas.len());
    for (expected, (index, operation)) in metas.into_iter().enumerate() {
        if index != expected {
            return Err(Error::MalformedPatch {
                name: format!("{expected}meta"),
                reason: "missing; indices must be contiguous from 0".into(),
            });
        }
        let payload_len = payloads.remove(&index);
        if operation.kind.has_payload() != payload_len.is_some() {
            return Err(Error::MalformedPatch {
                name: operation.data_name(),
                reason: format!("payload presence does not fit a {} operation", operation.kind),
            });
        }
        manifest.push(ManifestEntry {
            operation,
            payload_len,
        });
    }

    if let Some(orphan) = payloads.keys().next() {
        return Err(Error::MalformedPatch {
            name: format!("{orphan}data"),
            reason: "payload without a meta blob".into(),
        });
    }

    Ok(manifest)
}
