//! [`SourceDir`] builder for rewriter test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding source files and a save file.
///
/// # Example
///
/// ```rust,no_run
/// use rewriter_test_utils::SourceDir;
///
/// let dir = SourceDir::new();
/// let widget = dir.write("Widget.cs", "/// <summary>W</summary>\nclass Widget {}\n");
/// dir.assert_file_contains("Widget.cs", "<summary>W</summary>");
/// # let _ = widget;
/// ```
pub struct SourceDir {
    temp_dir: TempDir,
}

impl Default for SourceDir {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceDir {
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

    /// Path of the save file used by tests that persist the rewrite cache.
    pub fn save_file(&self) -> PathBuf {
        self.root().join("RewriterSavedState.json")
    }

    /// Write `content` to `name` (relative to the root) and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Read the file at `name` (relative to the root).
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, name: &str) -> String {
        let path = self.root().join(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that the file at `name` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, name: &str, content: &str) {
        let file_content = self.read(name);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            name,
            content,
            file_content
        );
    }
}
