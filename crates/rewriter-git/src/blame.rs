//! Per-line authorship from `git blame`.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use git2::Repository;

use crate::{Error, Result};

/// Memoized blame results, one entry per file.
///
/// Each file is blamed once against its current working-tree content, so
/// line numbers match what is on disk even when the file has uncommitted
/// changes. Lines that are not committed yet are attributed to the
/// repository's configured `user.name`, when there is one.
#[derive(Debug, Default)]
pub struct BlameIndex {
    files: HashMap<PathBuf, Vec<Option<String>>>,
}

impl BlameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authors of the lines `start_line..=end_line` (1-based) of `path`.
    ///
    /// Lines past the end of the file are ignored.
    pub fn authors_touching(
        &mut self,
        path: &Path,
        start_line: usize,
        end_line: usize,
    ) -> Result<BTreeSet<String>> {
        if start_line == 0 || end_line < start_line {
            return Err(Error::InvalidRange {
                start: start_line,
                end: end_line,
            });
        }

        let absolute = dunce::canonicalize(path).map_err(|e| rewriter_fs::Error::io(path, e))?;
        if !self.files.contains_key(&absolute) {
            let lines = blame_lines(&absolute)?;
            self.files.insert(absolute.clone(), lines);
        }

        let lines = self.files.get(&absolute).map(Vec::as_slice).unwrap_or_default();
        let authors = lines
            .iter()
            .skip(start_line - 1)
            .take(end_line - start_line + 1)
            .flatten()
            .cloned()
            .collect();

        Ok(authors)
    }
}

/// Blame every line of the working-tree file at `absolute`.
fn blame_lines(absolute: &Path) -> Result<Vec<Option<String>>> {
    let repo = Repository::discover(absolute.parent().unwrap_or(absolute))?;
    let workdir = repo
        .workdir()
        .ok_or_else(|| Error::BareRepository {
            path: repo.path().to_path_buf(),
        })?;
    let workdir = dunce::canonicalize(workdir).map_err(|e| rewriter_fs::Error::io(workdir, e))?;
    let relative = absolute
        .strip_prefix(&workdir)
        .map_err(|_| Error::OutsideWorkdir {
            path: absolute.to_path_buf(),
            workdir: workdir.clone(),
        })?;

    let content = rewriter_fs::read_text(absolute)?;
    let committed = repo.blame_file(relative, None)?;
    let blame = committed.blame_buffer(content.as_bytes())?;

    let uncommitted_author = repo
        .signature()
        .ok()
        .and_then(|s| s.name().map(str::to_string));

    let line_count = content.lines().count();
    let mut lines = Vec::with_capacity(line_count);
    for line in 1..=line_count {
        let author = blame.get_line(line).and_then(|hunk| {
            if hunk.final_commit_id().is_zero() {
                uncommitted_author.clone()
            } else {
                hunk.final_signature().name().map(str::to_string)
            }
        });
        lines.push(author);
    }

    tracing::debug!(
        file = %relative.display(),
        lines = line_count,
        "blamed file"
    );
    Ok(lines)
}
