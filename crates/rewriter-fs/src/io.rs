//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result};

/// Replace `path` with `content` in one step.
///
/// The bytes land in a hidden sibling file, held under an exclusive advisory
/// lock until synced, and the sibling is then renamed over `path`. A failed
/// write removes the sibling and leaves `path` untouched.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let staging = staging_path(path);
    let staged = stage(&staging, path, content).and_then(|()| {
        fs::rename(&staging, path).map_err(|e| Error::io(path, e))
    });

    if staged.is_err() {
        let _ = fs::remove_file(&staging);
    }
    staged?;

    tracing::trace!(path = %path.display(), bytes = content.len(), "replaced file");
    Ok(())
}

/// `.<name>.<pid>.tmp` next to `path`, so the rename never crosses filesystems.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

fn stage(staging: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let lock_failed = |_: std::io::Error| Error::LockFailed {
        path: target.to_path_buf(),
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(staging)
        .map_err(|e| Error::io(staging, e))?;

    file.lock_exclusive().map_err(lock_failed)?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(staging, e))?;
    file.unlock().map_err(lock_failed)
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Read text content from a file, treating a missing file as `None`.
///
/// Any other failure (permissions, invalid UTF-8) is still an error.
pub fn read_text_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
