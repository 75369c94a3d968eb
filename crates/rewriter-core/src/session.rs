//! One rewrite run over a list of source files
//!
//! Loads the rewrite cache, walks the files in order through a [`Rewriter`],
//! writes back the files that changed and saves the cache exactly once.

use std::path::{Path, PathBuf};

use rewriter_git::BlameIndex;

use crate::cache::RewriteCache;
use crate::collaborators::{Blame, Editor, StopPrompt};
use crate::config::RewriterConfig;
use crate::error::{Error, Result};
use crate::visitor::{RunState, RunStats, Rewriter};

/// What a finished run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files_visited: usize,
    pub files_written: usize,
    /// The user asked to stop before every file was visited
    pub stopped: bool,
    pub stats: RunStats,
    /// Where the cache was saved
    pub save_file: PathBuf,
}

impl RunSummary {
    /// Some edits failed and will be retried on the next run.
    pub fn has_errors(&self) -> bool {
        self.stats.edit_errors > 0
    }
}

/// A configured rewrite run.
///
/// Without an editor the session runs in automatic mode. With an author
/// filter and no explicit blame source, git blame is used.
pub struct Session<'a> {
    config: RewriterConfig,
    interactive: Option<(Box<dyn Editor + 'a>, Box<dyn StopPrompt + 'a>)>,
    blame: Option<Box<dyn Blame + 'a>>,
}

impl<'a> Session<'a> {
    pub fn new(config: RewriterConfig) -> Self {
        Self {
            config,
            interactive: None,
            blame: None,
        }
    }

    /// Send comments to `editor`, asking `prompt` after an empty edit.
    pub fn with_editor(mut self, editor: impl Editor + 'a, prompt: impl StopPrompt + 'a) -> Self {
        self.interactive = Some((Box::new(editor), Box::new(prompt)));
        self
    }

    /// Replace git blame as the source of comment authors.
    pub fn with_blame(mut self, blame: impl Blame + 'a) -> Self {
        self.blame = Some(Box::new(blame));
        self
    }

    pub fn config(&self) -> &RewriterConfig {
        &self.config
    }

    /// Rewrite `files` in order.
    ///
    /// Failed edits are counted in the summary and do not abort the run.
    /// Reading or writing a source file does; the cache is still saved first
    /// so finished edits are not lost.
    pub fn run(self, files: &[PathBuf]) -> Result<RunSummary> {
        if files.is_empty() {
            return Err(Error::NoSourceFiles);
        }

        let Session {
            config,
            interactive,
            blame,
        } = self;

        let cache = RewriteCache::load(&config.save_file)?;

        let mut rewriter = match interactive {
            Some((editor, prompt)) => Rewriter::interactive(cache, editor, prompt),
            None => Rewriter::automatic(cache),
        }
        .with_tag_order(config.tag_order.clone());

        if let Some(author) = &config.author_filter {
            tracing::info!("Only editing comments touched by {author}");
            rewriter = match blame {
                Some(blame) => rewriter.with_author_filter(author.clone(), blame),
                None => rewriter.with_author_filter(author.clone(), BlameIndex::new()),
            };
        }

        let mut files_visited = 0;
        let mut files_written = 0;

        for file in files {
            if rewriter.is_stopping() {
                break;
            }
            files_visited += 1;

            match rewrite_file(&mut rewriter, file) {
                Ok(true) => files_written += 1,
                Ok(false) => {}
                Err(e) => {
                    let (cache, _, _) = rewriter.finish();
                    if let Err(save_error) = cache.save(&config.save_file) {
                        tracing::error!("Could not save progress: {save_error}");
                    }
                    return Err(e);
                }
            }
        }

        let (cache, stats, state) = rewriter.finish();
        cache.save(&config.save_file)?;

        let summary = RunSummary {
            files_visited,
            files_written,
            stopped: state == RunState::Stopping,
            stats,
            save_file: config.save_file,
        };

        if summary.stopped {
            tracing::info!("Stopped after {} of {} files", files_visited, files.len());
        } else {
            tracing::info!("Nothing left to do! Exiting...");
        }

        Ok(summary)
    }
}

/// Rewrite one file in place; `true` if its content changed.
fn rewrite_file(rewriter: &mut Rewriter<'_>, file: &Path) -> Result<bool> {
    tracing::info!("Current file: {}", file.display());

    let source = rewriter_fs::read_text(file)?;
    let rewritten = rewriter.rewrite_source(file, &source)?;

    if rewritten == source {
        tracing::debug!(file = %file.display(), "no changes");
        return Ok(false);
    }

    rewriter_fs::write_text(file, &rewritten)?;
    tracing::debug!(file = %file.display(), "written");
    Ok(true)
}
