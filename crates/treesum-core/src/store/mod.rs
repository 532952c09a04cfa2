//! Checksum database
//!
//! The store is an insertion-ordered map from tree-relative path to
//! [`ChecksumEntry`]. It is persisted as a text file with one
//! `<digest>  <path>` line per entry, in store order.

mod entry;

pub use entry::ChecksumEntry;

use std::path::Path;

use indexmap::IndexMap;

use treesum_fs::{Digest, io};

use crate::{Error, Result};

/// Separator between the digest head and the path on a database line
pub const SEPARATOR: &str = "  ";

/// Insertion-ordered path to digest mapping
///
/// Order is significant: it drives iteration, reporting and the line order
/// of the saved file. Updating an existing path keeps its position.
#[derive(Debug, Clone, Default)]
pub struct ChecksumStore {
    entries: IndexMap<String, ChecksumEntry>,
}

/// Two stores are equal when they hold the same entries in the same order.
impl PartialEq for ChecksumStore {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for ChecksumStore {}

impl ChecksumStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a database file
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read, and
    /// [`Error::DataIntegrity`] for the first malformed line.
    pub fn load(path: &Path) -> Result<Self> {
        match io::read_text_if_exists(path)? {
            Some(content) => {
                let store = Self::parse(&content, path)?;
                tracing::debug!(path = %path.display(), entries = store.len(), "Loaded checksum database");
                Ok(store)
            }
            None => {
                tracing::debug!(path = %path.display(), "No checksum database found, starting empty");
                Ok(Self::new())
            }
        }
    }

    /// Parse database text. `source` is only used for error reporting.
    ///
    /// Blank lines are skipped. A path listed twice keeps its first position
    /// and its last digest.
    pub fn parse(content: &str, source: &Path) -> Result<Self> {
        let mut store = Self::new();
        for (idx, raw) in content.split('\n').enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let (digest, path) = parse_line(line).map_err(|reason| Error::DataIntegrity {
                path: source.to_path_buf(),
                line: idx + 1,
                reason,
            })?;
            store.set(path, digest);
        }
        Ok(store)
    }

    /// Render the store in database format
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrepresentablePath`] for a path containing a line
    /// terminator.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        for entry in self.iter() {
            if entry.path.contains(['\n', '\r']) {
                return Err(Error::UnrepresentablePath {
                    path: entry.path.clone(),
                    reason: "contains a line terminator".into(),
                });
            }
            out.push_str(&entry.to_line());
            out.push('\n');
        }
        Ok(out)
    }

    /// Overwrite `path` with the full store contents
    ///
    /// The file is replaced atomically; nothing is merged with what is on disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.render()?;
        io::write_text(path, &content)?;
        tracing::debug!(path = %path.display(), entries = self.len(), "Saved checksum database");
        Ok(())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `path` has an entry
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Look up the entry for `path`
    pub fn get(&self, path: &str) -> Option<&ChecksumEntry> {
        self.entries.get(path)
    }

    /// Look up the entry for `path` mutably
    pub fn get_mut(&mut self, path: &str) -> Option<&mut ChecksumEntry> {
        self.entries.get_mut(path)
    }

    /// Record `digest` for `path`
    ///
    /// An existing entry keeps its position and `seen` flag and has its
    /// digest replaced; the previous digest is returned. A new path is
    /// appended unseen.
    pub fn set(&mut self, path: impl Into<String>, digest: Digest) -> Option<Digest> {
        let path = path.into();
        if let Some(entry) = self.entries.get_mut(&path) {
            return Some(std::mem::replace(&mut entry.digest, digest));
        }
        self.entries
            .insert(path.clone(), ChecksumEntry::new(path, digest));
        None
    }

    /// Flag `path` as encountered in the current pass
    ///
    /// Returns `false` if the path has no entry.
    pub fn mark_seen(&mut self, path: &str) -> bool {
        match self.entries.get_mut(path) {
            Some(entry) => {
                entry.seen = true;
                true
            }
            None => false,
        }
    }

    /// Clear every `seen` flag
    pub fn reset_seen(&mut self) {
        for entry in self.entries.values_mut() {
            entry.seen = false;
        }
    }

    /// Remove the entry for `path`, keeping the order of the rest
    pub fn remove(&mut self, path: &str) -> Option<ChecksumEntry> {
        self.entries.shift_remove(path)
    }

    /// Keep only the entries for which `keep` returns `true`
    ///
    /// Visits every entry once in store order; survivors keep their order.
    pub fn retain(&mut self, mut keep: impl FnMut(&ChecksumEntry) -> bool) {
        self.entries.retain(|_, entry| keep(entry));
    }

    /// Owned copy of every path in store order
    ///
    /// Iterate this snapshot when entries may be removed along the way.
    pub fn paths_snapshot(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Entries in store order
    pub fn iter(&self) -> impl Iterator<Item = &ChecksumEntry> {
        self.entries.values()
    }
}

fn parse_line(line: &str) -> std::result::Result<(Digest, &str), String> {
    let (head, path) = line
        .split_once(SEPARATOR)
        .ok_or_else(|| "missing two-space separator after digest".to_string())?;
    let digest = Digest::parse(head).map_err(|e| e.to_string())?;
    if path.is_empty() {
        return Err("empty path".into());
    }
    Ok((digest, path))
}
