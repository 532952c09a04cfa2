//! Tree-relative paths as stored in checksum databases

use std::path::{Component, Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Checksum databases key entries by tree-relative paths; normalizing to
/// forward slashes keeps a database portable between platforms. Conversion
/// to a platform-native path only happens at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Build the relative path of `path` below `root`.
    ///
    /// Returns `None` when `path` is not inside `root` or when a segment is
    /// not valid UTF-8.
    pub fn relative_to(path: &Path, root: &Path) -> Option<Self> {
        let rel = path.strip_prefix(root).ok()?;
        let segments: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_str().map(str::to_owned)),
                _ => None,
            })
            .collect::<Option<_>>()?;
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            inner: segments.join("/"),
        })
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Consume the path, returning the normalized string.
    pub fn into_string(self) -> String {
        self.inner
    }

    /// Convert this relative path to a platform-native PathBuf.
    ///
    /// Empty segments are dropped, so a leading `/` does not survive.
    pub fn to_native(&self) -> PathBuf {
        self.inner.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Resolve this relative path against a native root directory.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(self.to_native())
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}
