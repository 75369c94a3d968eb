//! Comment visitor: the per-comment rewrite flow
//!
//! For every doc comment in a file the [`Rewriter`] decides whether the
//! comment was handled before, whether its author matters, and otherwise
//! strips its padding, hands the body to the editor, normalizes the result
//! and lays it back into the source.

use std::borrow::Cow;
use std::path::Path;

use crate::cache::RewriteCache;
use crate::collaborators::{Blame, EditContext, Editor, StopPrompt};
use crate::error::{Error, Result};
use crate::padding::{self, PaddedComment};
use crate::reorder::{TagOrder, reorder_tags};
use crate::source::{DocComment, find_doc_comments};

/// Whether the rewriter still edits comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Running,
    /// The user asked to pause; no further comment is edited this run.
    Stopping,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Doc comments looked at while running
    pub comments_seen: usize,
    /// Comments resolved from the rewrite cache
    pub cache_hits: usize,
    /// Comments skipped by the author filter
    pub skipped_by_author: usize,
    /// Comments handed to the editor
    pub edits_requested: usize,
    /// Comments whose text changed
    pub comments_rewritten: usize,
    /// Comments that could not be processed
    pub edit_errors: usize,
}

/// What happened to a single comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOutcome {
    /// Emit this text in place of the raw comment
    Replace(String),
    /// Leave the raw comment as it is
    Keep,
}

/// How edits are produced.
enum EditMode<'a> {
    /// No editor: bodies pass through unchanged so only cached rewrites and
    /// tag normalization apply.
    Automatic,
    Interactive {
        editor: Box<dyn Editor + 'a>,
        prompt: Box<dyn StopPrompt + 'a>,
    },
}

struct AuthorFilter<'a> {
    author: String,
    blame: Box<dyn Blame + 'a>,
}

/// The comment-rewrite engine.
///
/// Owns the rewrite cache for the duration of a run; hand it back with
/// [`Rewriter::finish`] and persist it once at the end.
pub struct Rewriter<'a> {
    cache: RewriteCache,
    mode: EditMode<'a>,
    author_filter: Option<AuthorFilter<'a>>,
    tag_order: Option<TagOrder>,
    state: RunState,
    stats: RunStats,
}

impl<'a> Rewriter<'a> {
    /// A rewriter that applies cached rewrites and tag normalization only.
    pub fn automatic(cache: RewriteCache) -> Self {
        Self::with_mode(cache, EditMode::Automatic)
    }

    /// A rewriter that sends every new comment to `editor`.
    pub fn interactive(
        cache: RewriteCache,
        editor: impl Editor + 'a,
        prompt: impl StopPrompt + 'a,
    ) -> Self {
        Self::with_mode(
            cache,
            EditMode::Interactive {
                editor: Box::new(editor),
                prompt: Box::new(prompt),
            },
        )
    }

    fn with_mode(cache: RewriteCache, mode: EditMode<'a>) -> Self {
        Self {
            cache,
            mode,
            author_filter: None,
            tag_order: None,
            state: RunState::Running,
            stats: RunStats::default(),
        }
    }

    /// Only edit comments whose lines were last touched by `author`.
    pub fn with_author_filter(mut self, author: impl Into<String>, blame: impl Blame + 'a) -> Self {
        self.author_filter = Some(AuthorFilter {
            author: author.into(),
            blame: Box::new(blame),
        });
        self
    }

    /// Reorder tags after every edit.
    pub fn with_tag_order(mut self, tag_order: Option<TagOrder>) -> Self {
        self.tag_order = tag_order;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_stopping(&self) -> bool {
        self.state == RunState::Stopping
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn cache(&self) -> &RewriteCache {
        &self.cache
    }

    /// End the run, returning the cache for persisting.
    pub fn finish(self) -> (RewriteCache, RunStats, RunState) {
        (self.cache, self.stats, self.state)
    }

    /// Rewrite every doc comment in `source`, which was read from `file_path`.
    ///
    /// Once the run is stopping, the remaining comments are copied through
    /// unchanged. Only console failures from the stop prompt are returned
    /// as errors; per-comment failures are logged and counted.
    pub fn rewrite_source(&mut self, file_path: &Path, source: &str) -> Result<String> {
        let mut rewritten = String::with_capacity(source.len());
        let mut copied_to = 0;

        for comment in find_doc_comments(source) {
            if self.is_stopping() {
                break;
            }

            if let CommentOutcome::Replace(replacement) = self.visit_comment(file_path, &comment)? {
                rewritten.push_str(&source[copied_to..comment.span.start]);
                rewritten.push_str(&replacement);
                copied_to = comment.span.end;
            }
        }

        rewritten.push_str(&source[copied_to..]);
        Ok(rewritten)
    }

    /// Decide the fate of one comment.
    pub fn visit_comment(&mut self, file_path: &Path, comment: &DocComment<'_>) -> Result<CommentOutcome> {
        if self.is_stopping() {
            return Ok(CommentOutcome::Keep);
        }
        self.stats.comments_seen += 1;
        let raw = comment.text;

        if let Some(cached) = self.cache.lookup(raw).map(|cached| fit_to_indent(cached, comment)) {
            tracing::debug!(line = comment.first_line, "comment already handled");
            self.stats.cache_hits += 1;
            return Ok(self.replace_if_changed(raw, cached));
        }

        if !self.passes_author_filter(file_path, comment) {
            return Ok(CommentOutcome::Keep);
        }

        let padded = match padding::decompose(raw) {
            Ok(padded) => padded,
            Err(e) => return Ok(self.edit_failed(file_path, comment, &e)),
        };

        let body = padded.body();
        let edited = match &mut self.mode {
            EditMode::Automatic => body.clone(),
            EditMode::Interactive { editor, .. } => {
                self.stats.edits_requested += 1;
                let context = EditContext {
                    file_path,
                    line_number: comment.first_line,
                };
                match editor.edit(&body, &context) {
                    Ok(edited) => edited,
                    Err(e) => return Ok(self.edit_failed(file_path, comment, &e)),
                }
            }
        };

        if edited.trim().is_empty() {
            self.handle_empty_edit()?;
            return Ok(CommentOutcome::Keep);
        }

        let (normalized, cacheable) = match &self.tag_order {
            Some(order) => match reorder_tags(order, &edited) {
                Ok(reordered) => (reordered, true),
                Err(e) => {
                    self.edit_failed(file_path, comment, &e);
                    (edited, false)
                }
            },
            None => (edited, true),
        };

        let replacement = if normalized.trim_end() == body.trim_end() {
            raw.to_string()
        } else {
            padded.recompose(&normalized, &body_prefix(&padded, comment))
        };

        let automatic = matches!(self.mode, EditMode::Automatic);
        if cacheable && !(automatic && replacement == raw) {
            self.cache.record(raw, &replacement);
        }

        Ok(self.replace_if_changed(raw, replacement))
    }

    fn replace_if_changed(&mut self, raw: &str, replacement: String) -> CommentOutcome {
        if replacement == raw {
            CommentOutcome::Keep
        } else {
            self.stats.comments_rewritten += 1;
            CommentOutcome::Replace(replacement)
        }
    }

    /// `true` when no filter is set or the filter author touched the comment.
    fn passes_author_filter(&mut self, file_path: &Path, comment: &DocComment<'_>) -> bool {
        let Some(filter) = self.author_filter.as_mut() else {
            return true;
        };

        match filter
            .blame
            .authors_touching(file_path, comment.first_line, comment.declaration_line())
        {
            Ok(authors) if authors.contains(&filter.author) => true,
            Ok(authors) => {
                tracing::debug!(
                    line = comment.first_line,
                    ?authors,
                    "skipping comment not touched by {}",
                    filter.author
                );
                self.stats.skipped_by_author += 1;
                false
            }
            Err(e) => {
                self.edit_failed(file_path, comment, &e);
                false
            }
        }
    }

    /// Ask whether to stop after an empty edit.
    fn handle_empty_edit(&mut self) -> Result<()> {
        let EditMode::Interactive { prompt, .. } = &mut self.mode else {
            return Ok(());
        };

        if prompt.confirm_stop()? {
            tracing::info!("Stopping; progress will be saved");
            self.state = RunState::Stopping;
        } else {
            tracing::info!("Empty edit, leaving the original comment as it was");
        }
        Ok(())
    }

    fn edit_failed(&mut self, file_path: &Path, comment: &DocComment<'_>, error: &Error) -> CommentOutcome {
        tracing::warn!(
            file = %file_path.display(),
            line = comment.first_line,
            "edit failed: {error}"
        );
        self.stats.edit_errors += 1;
        CommentOutcome::Keep
    }
}

/// Prefix for every rewritten line after the first.
///
/// Single-line comments have no body prefix of their own, so one is built
/// from the source indentation and the head marker.
fn body_prefix<'c>(padded: &PaddedComment<'c>, comment: &DocComment<'c>) -> Cow<'c, str> {
    match padded.body_prefix() {
        Some(prefix) => Cow::Borrowed(prefix),
        None => Cow::Owned(format!("{}{}", comment.indent, padded.head_prefix())),
    }
}

/// A cached replacement laid out for `comment`'s position.
///
/// The key of a single-line comment carries no indentation, so the same key
/// can be hit at any depth. Continuation lines of its replacement are moved
/// to the indentation of the comment being replaced.
fn fit_to_indent(cached: &str, comment: &DocComment<'_>) -> String {
    if comment.first_line != comment.last_line {
        return cached.to_string();
    }

    let mut lines = cached.split_inclusive('\n');
    let mut fitted = lines.next().unwrap_or_default().to_string();
    for line in lines {
        fitted.push_str(comment.indent);
        fitted.push_str(line.trim_start_matches([' ', '\t']));
    }
    fitted
}
