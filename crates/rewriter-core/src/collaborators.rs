//! Collaborator traits the engine calls out to
//!
//! The engine never spawns processes or touches the console itself. The CLI
//! supplies real implementations; tests supply scripted ones.

use std::collections::BTreeSet;
use std::path::Path;

use rewriter_git::BlameIndex;

use crate::Result;

/// Where the comment being edited lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditContext<'a> {
    pub file_path: &'a Path,
    /// 1-based line of the first comment line
    pub line_number: usize,
}

/// Produces the replacement text for a comment body.
///
/// Must return the full replacement, not a diff. An empty or
/// whitespace-only result asks the engine to pause.
pub trait Editor {
    fn edit(&mut self, content: &str, context: &EditContext<'_>) -> Result<String>;
}

/// Asked after an empty edit whether to stop the whole run.
///
/// `Ok(false)` skips only the current comment.
pub trait StopPrompt {
    fn confirm_stop(&mut self) -> Result<bool>;
}

/// Authors who last touched a range of lines (1-based, inclusive).
pub trait Blame {
    fn authors_touching(
        &mut self,
        file_path: &Path,
        start_line: usize,
        end_line: usize,
    ) -> Result<BTreeSet<String>>;
}

impl<E: Editor + ?Sized> Editor for &mut E {
    fn edit(&mut self, content: &str, context: &EditContext<'_>) -> Result<String> {
        (**self).edit(content, context)
    }
}

impl<P: StopPrompt + ?Sized> StopPrompt for &mut P {
    fn confirm_stop(&mut self) -> Result<bool> {
        (**self).confirm_stop()
    }
}

impl<B: Blame + ?Sized> Blame for &mut B {
    fn authors_touching(
        &mut self,
        file_path: &Path,
        start_line: usize,
        end_line: usize,
    ) -> Result<BTreeSet<String>> {
        (**self).authors_touching(file_path, start_line, end_line)
    }
}

impl<E: Editor + ?Sized> Editor for Box<E> {
    fn edit(&mut self, content: &str, context: &EditContext<'_>) -> Result<String> {
        (**self).edit(content, context)
    }
}

impl<P: StopPrompt + ?Sized> StopPrompt for Box<P> {
    fn confirm_stop(&mut self) -> Result<bool> {
        (**self).confirm_stop()
    }
}

impl<B: Blame + ?Sized> Blame for Box<B> {
    fn authors_touching(
        &mut self,
        file_path: &Path,
        start_line: usize,
        end_line: usize,
    ) -> Result<BTreeSet<String>> {
        (**self).authors_touching(file_path, start_line, end_line)
    }
}

impl Blame for BlameIndex {
    fn authors_touching(
        &mut self,
        file_path: &Path,
        start_line: usize,
        end_line: usize,
    ) -> Result<BTreeSet<String>> {
        Ok(BlameIndex::authors_touching(self, file_path, start_line, end_line)?)
    }
}
