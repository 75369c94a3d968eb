//! External editor process
//!
//! Writes the comment body to a temporary `.xml` file, opens it in the
//! user's editor and reads the file back once the editor exits.

use std::ffi::OsString;
use std::io::Write;
use std::process::Command;

use rewriter_core::{EditContext, Editor, Error, Result};

/// Environment variable exported to the editor with the source file path.
pub const SOURCE_FILE_ENV: &str = "DOC_REWRITER_SOURCE_FILE";

/// Environment variable exported to the editor with the comment's first line.
pub const SOURCE_LINE_ENV: &str = "DOC_REWRITER_SOURCE_LINE";

const FALLBACK_EDITOR: &str = "vi";

/// Edits comment bodies in `$VISUAL`, `$EDITOR` or `vi`.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// Editor command line, e.g. `code --wait`; the file path is appended.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn from_env() -> Self {
        let command = ["VISUAL", "EDITOR"]
            .into_iter()
            .filter_map(std::env::var_os)
            .map(OsString::into_string)
            .filter_map(std::result::Result::ok)
            .find(|c| !c.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_EDITOR.to_string());
        Self::new(command)
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Editor for ExternalEditor {
    fn edit(&mut self, content: &str, context: &EditContext<'_>) -> Result<String> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| Error::editor("editor command is empty"))?;

        let mut file = tempfile::Builder::new()
            .prefix("doc-rewriter-")
            .suffix(".xml")
            .tempfile()?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        tracing::debug!(
            editor = %self.command,
            file = %context.file_path.display(),
            line = context.line_number,
            "opening editor"
        );

        let status = Command::new(program)
            .args(parts)
            .arg(file.path())
            .env(SOURCE_FILE_ENV, context.file_path)
            .env(SOURCE_LINE_ENV, context.line_number.to_string())
            .status()
            .map_err(|e| Error::editor(format!("could not start `{program}`: {e}")))?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(Error::editor(format!("`{}` exited with code {code}", self.command)));
        }

        let bytes = std::fs::read(file.path())?;
        String::from_utf8(bytes).map_err(|_| Error::editor("edited text is not valid UTF-8"))
    }
}
