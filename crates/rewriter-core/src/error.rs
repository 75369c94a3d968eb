//! Error types for rewriter-core

use std::path::PathBuf;

/// Result type for rewriter-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rewriter-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A line of a doc comment block does not carry the `///` marker
    #[error("Malformed doc comment on line {line}: {text:?}")]
    MalformedComment { line: usize, text: String },

    /// The comment body is not a well-formed markup fragment
    #[error("Failed to parse comment markup: {message}")]
    TagParse { message: String },

    /// The save file exists but does not hold a flat string map
    #[error("Save file {path} is corrupt: {source}")]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The editor collaborator failed to produce a replacement
    #[error("Editor failed: {message}")]
    Editor { message: String },

    /// The stop/continue prompt could not be shown or answered
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// A run was started without any source files
    #[error("You must provide at least one source file")]
    NoSourceFiles,

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from rewriter-fs
    #[error(transparent)]
    Fs(#[from] rewriter_fs::Error),

    /// Git error from rewriter-git
    #[error(transparent)]
    Git(#[from] rewriter_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn tag_parse(message: impl Into<String>) -> Self {
        Self::TagParse {
            message: message.into(),
        }
    }

    pub fn editor(message: impl Into<String>) -> Self {
        Self::Editor {
            message: message.into(),
        }
    }

    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }
}
