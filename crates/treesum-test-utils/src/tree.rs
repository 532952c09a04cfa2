//! [`TestTree`] builder for verification and patch scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use treesum_fs::checksum::compute_content_digest;

/// Rendered digest of `content`, as it appears in a database line.
pub fn digest_of(content: &str) -> String {
    compute_content_digest(content.as_bytes()).to_string()
}

/// A temporary workspace holding a file tree under `tree/` and any number
/// of checksum databases and ignore lists beside it.
///
/// # Example
///
/// ```rust,no_run
/// use treesum_test_utils::TestTree;
///
/// let t = TestTree::new();
/// t.write("a.txt", "hi");
/// t.write_database("checksums", &[("a.txt", "hi")]);
/// assert!(t.read_database("checksums").contains("a.txt"));
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty workspace with an empty `tree/` directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("tree")).unwrap();
        Self { temp_dir }
    }

    /// Root of the temporary workspace.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The file tree under test.
    pub fn tree(&self) -> PathBuf {
        self.root().join("tree")
    }

    /// A path beside the tree, for databases, ignore lists and patches.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` to `rel` inside the tree, creating directories.
    pub fn write(&self, rel: &str, content: &str) {
        let full = self.tree().join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content)
            .unwrap_or_else(|e| panic!("TestTree::write: failed to write {}: {e}", full.display()));
    }

    /// Delete `rel` from the tree.
    pub fn remove(&self, rel: &str) {
        let full = self.tree().join(rel);
        fs::remove_file(&full)
            .unwrap_or_else(|e| panic!("TestTree::remove: failed to remove {}: {e}", full.display()));
    }

    /// Write a database called `name` with one line per `(path, content)`,
    /// each carrying the digest of `content`.
    pub fn write_database(&self, name: &str, entries: &[(&str, &str)]) -> PathBuf {
        let body: String = entries
            .iter()
            .map(|(path, content)| format!("{}  {}\n", digest_of(content), path))
            .collect();
        self.write_raw(name, &body)
    }

    /// Write an ignore list called `name` with one pattern per line.
    pub fn write_ignore_list(&self, name: &str, patterns: &[&str]) -> PathBuf {
        let mut body = patterns.join("\n");
        body.push('\n');
        self.write_raw(name, &body)
    }

    /// Write arbitrary text beside the tree.
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestTree::write_raw: failed to write {}: {e}", path.display()));
        path
    }

    /// Raw text of the database called `name`.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_database(&self, name: &str) -> String {
        let path = self.path(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read database: {}", path.display()))
    }

    /// Assert that `name` beside the tree does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, name: &str) {
        let full_path = self.path(name);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
