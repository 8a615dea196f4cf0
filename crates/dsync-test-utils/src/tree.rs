//! [`TestTree`] builder for on-disk sync scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use dsync_fs::OsFs;
use tempfile::TempDir;

/// A temporary directory with helpers for laying out and inspecting a tree.
///
/// # Example
///
/// ```rust,no_run
/// use dsync_test_utils::TestTree;
///
/// let tree = TestTree::new().file("a.txt", "hi").dir("empty");
/// tree.assert_file("a.txt", "hi");
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
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Resolve a slash-separated path beneath the root.
    pub fn path(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|c| !c.is_empty())
            .fold(self.root().to_path_buf(), |acc, c| acc.join(c))
    }

    /// An [`OsFs`] capability rooted at this tree.
    pub fn fs(&self) -> OsFs {
        OsFs::new(self.root())
    }

    /// Write a file, creating its parent directories.
    pub fn file(self, rel: &str, content: &str) -> Self {
        self.write(rel, content);
        self
    }

    /// Create a directory and its ancestors.
    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.path(rel))
            .unwrap_or_else(|e| panic!("TestTree::dir: failed to create {rel}: {e}"));
        self
    }

    /// Write a file in place, for changing a tree mid-test.
    pub fn write(&self, rel: &str, content: &str) {
        let full_path = self.path(rel);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("TestTree::write: failed to write {rel}: {e}"));
    }

    /// Set a file's modification time.
    pub fn set_modified(&self, rel: &str, modified: SystemTime) {
        let file = fs::File::options()
            .write(true)
            .open(self.path(rel))
            .unwrap_or_else(|e| panic!("TestTree::set_modified: failed to open {rel}: {e}"));
        file.set_modified(modified).unwrap();
    }

    /// Read a file as UTF-8.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel))
            .unwrap_or_else(|e| panic!("Could not read file {rel}: {e}"))
    }

    /// Every file below the root as a `path -> content` map.
    pub fn files(&self) -> BTreeMap<String, String> {
        let mut files = BTreeMap::new();
        collect(self.root(), "", &mut files);
        files
    }

    /// Assert that the file at `rel` holds exactly `content`.
    ///
    /// # Panics
    /// Panics with a descriptive message on mismatch.
    pub fn assert_file(&self, rel: &str, content: &str) {
        let actual = self.read(rel);
        assert_eq!(
            actual, content,
            "File {} does not hold the expected content",
            rel
        );
    }

    /// Assert that `rel` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_missing(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            !full_path.exists(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }

    pub fn assert_dir(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            full_path.is_dir(),
            "Expected directory: {}",
            full_path.display()
        );
    }
}

fn collect(dir: &Path, prefix: &str, files: &mut BTreeMap<String, String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let name = entry.file_name().to_string_lossy().into_owned();
        let rel = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        if entry.file_type().unwrap().is_dir() {
            collect(&entry.path(), &rel, files);
        } else {
            files.insert(rel, fs::read_to_string(entry.path()).unwrap());
        }
    }
}
