//! Error types for rewriter-git

use std::path::PathBuf;

/// Result type for rewriter-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rewriter-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] rewriter_fs::Error),

    #[error("Repository at {path} has no working directory")]
    BareRepository { path: PathBuf },

    #[error("{path} is not inside the repository working directory {workdir}")]
    OutsideWorkdir { path: PathBuf, workdir: PathBuf },

    #[error("Invalid line range {start}..={end}")]
    InvalidRange { start: usize, end: usize },
}
