//! Deterministic tree walking
//!
//! Yields every regular file below a root together with its forward-slash
//! path relative to that root. Entries come back sorted by file name within
//! each directory so that new database entries are appended in a stable order.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

/// A regular file discovered below a walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    /// Path relative to the walk root, `/`-separated
    pub relative: NormalizedPath,
    /// Native path usable for I/O
    pub absolute: PathBuf,
}

/// Iterator over the regular files of a tree.
///
/// A symlink is reported as a file when it resolves to a regular file and is
/// then read through the link. Symlinked directories are not descended into
/// and dangling links are skipped. Any walk failure, including a missing root
/// or a name that is not valid UTF-8, is yielded as an error; callers abort on
/// the first one.
pub struct TreeWalker {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl TreeWalker {
    /// Start a walk below `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let inner = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        Self { root, inner }
    }

    fn map_error(&self, err: walkdir::Error) -> Error {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        let message = err.to_string();
        match err.into_io_error() {
            Some(source) => Error::io(path, source),
            None => Error::Walk {
                root: self.root.clone(),
                message,
            },
        }
    }
}

impl Iterator for TreeWalker {
    type Item = Result<TreeFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(self.map_error(err))),
            };
            match self.tree_file(entry) {
                Ok(Some(file)) => return Some(Ok(file)),
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl TreeWalker {
    fn tree_file(&self, entry: walkdir::DirEntry) -> Result<Option<TreeFile>> {
        if !is_regular_file(&entry)? {
            return Ok(None);
        }
        let Ok(rel) = entry.path().strip_prefix(&self.root) else {
            return Ok(None);
        };
        if rel.to_str().is_none() {
            return Err(Error::NonUtf8Path {
                path: entry.into_path(),
            });
        }
        let Some(relative) = NormalizedPath::relative_to(entry.path(), &self.root) else {
            return Ok(None);
        };
        Ok(Some(TreeFile {
            relative,
            absolute: entry.into_path(),
        }))
    }
}

fn is_regular_file(entry: &walkdir::DirEntry) -> Result<bool> {
    let file_type = entry.file_type();
    if !file_type.is_symlink() {
        return Ok(file_type.is_file());
    }
    match fs::metadata(entry.path()) {
        Ok(target) => Ok(target.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %entry.path().display(), "Skipping dangling symlink");
            Ok(false)
        }
        Err(e) => Err(Error::io(entry.path(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn walk_yields_relative_forward_slash_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/deeper/file.txt"), "x").unwrap();

        let files: Vec<TreeFile> = TreeWalker::new(dir.path())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative.as_str(), "sub/deeper/file.txt");
        assert_eq!(files[0].absolute, dir.path().join("sub/deeper/file.txt"));
    }

    #[test]
    fn walk_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("empty/nested")).unwrap();

        let count = TreeWalker::new(dir.path()).count();
        assert_eq!(count, 0);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_is_reported_under_link_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("real.txt"), "x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt"))
            .unwrap();

        let files: Vec<TreeFile> = TreeWalker::new(dir.path())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].relative.as_str(), "link.txt");
        assert_eq!(files[0].absolute, dir.path().join("link.txt"));
    }

    #[test]
    fn walk_of_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut walker = TreeWalker::new(dir.path().join("missing"));
        assert!(matches!(walker.next(), Some(Err(Error::Io { .. }))));
    }
}
