//! Padding model for `///` doc comment blocks
//!
//! A raw comment block is split into per-line `(prefix, content)` pairs so
//! the content can be edited without its indentation and markers, then laid
//! back into the source with the original head/body padding.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Leading whitespace, the doc comment marker, and at most one space.
static PAD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*/// ?").expect("Invalid padding regex"));

/// Line terminator of one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// One physical line of a comment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddedLine<'a> {
    /// Indentation and comment marker
    pub prefix: &'a str,
    /// Text after the prefix
    pub content: &'a str,
    /// Terminator, `None` only for an unterminated last line
    pub ending: Option<LineEnding>,
}

impl PaddedLine<'_> {
    /// `prefix + content + terminator`
    pub fn to_raw(&self) -> String {
        let ending = self.ending.map(LineEnding::as_str).unwrap_or_default();
        format!("{}{}{}", self.prefix, self.content, ending)
    }
}

/// A raw comment block decomposed into padded lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedComment<'a> {
    lines: Vec<PaddedLine<'a>>,
}

impl<'a> PaddedComment<'a> {
    pub fn lines(&self) -> &[PaddedLine<'a>] {
        &self.lines
    }

    /// Prefix of the first line; the marker that opens the comment.
    pub fn head_prefix(&self) -> &'a str {
        self.lines.first().map(|l| l.prefix).unwrap_or_default()
    }

    /// Prefix used for continuation lines, if the block has more than one line.
    ///
    /// Taken from the first continuation line with content, so a bare `///`
    /// separator does not drop the space after the marker. Falls back to the
    /// second line when every continuation line is empty.
    pub fn body_prefix(&self) -> Option<&'a str> {
        let mut body = self.lines.iter().skip(1);
        body.clone()
            .find(|l| !l.content.is_empty())
            .or_else(|| body.next())
            .map(|l| l.prefix)
    }

    /// Line ending used by the block, taken from its first terminated line.
    pub fn line_ending(&self) -> LineEnding {
        self.lines
            .iter()
            .find_map(|l| l.ending)
            .unwrap_or(LineEnding::Lf)
    }

    /// Whether the last line of the block carries a terminator.
    pub fn is_terminated(&self) -> bool {
        self.lines.last().is_some_and(|l| l.ending.is_some())
    }

    /// The editable body: every line's content followed by `\n`.
    pub fn body(&self) -> String {
        let mut body = String::new();
        for line in &self.lines {
            body.push_str(line.content);
            body.push('\n');
        }
        body
    }

    /// Reassemble the original raw text from the padded lines.
    pub fn to_raw(&self) -> String {
        self.lines.iter().map(PaddedLine::to_raw).collect()
    }

    /// Lay an edited body back into this block's padding.
    ///
    /// The first edited line takes the head prefix, every later line takes
    /// `body_prefix`. The result ends with a terminator only when the
    /// original block did.
    pub fn recompose(&self, edited: &str, body_prefix: &str) -> String {
        let ending = self.line_ending();
        let mut rewritten = recompose(self.head_prefix(), body_prefix, edited, ending);
        if !self.is_terminated() {
            let trimmed_len = rewritten
                .strip_suffix(ending.as_str())
                .map(str::len)
                .unwrap_or(rewritten.len());
            rewritten.truncate(trimmed_len);
        }
        rewritten
    }
}

/// Split `raw` into padded lines.
///
/// Every non-blank line must start with optional whitespace and `///`;
/// wholly blank lines are kept as prefix-only lines with empty content.
pub fn decompose(raw: &str) -> Result<PaddedComment<'_>> {
    let mut lines = Vec::new();

    for (index, (line, ending)) in split_lines(raw).enumerate() {
        if line.trim().is_empty() {
            lines.push(PaddedLine {
                prefix: line,
                content: "",
                ending,
            });
            continue;
        }

        let Some(marker) = PAD_PATTERN.find(line) else {
            return Err(Error::MalformedComment {
                line: index + 1,
                text: line.to_string(),
            });
        };

        let (prefix, content) = line.split_at(marker.end());
        lines.push(PaddedLine {
            prefix,
            content,
            ending,
        });
    }

    Ok(PaddedComment { lines })
}

/// Prefix each edited line and terminate it with `ending`.
///
/// The first line gets `head_prefix`, the rest get `body_prefix`. An edit
/// with a single line only ever uses the head prefix.
pub fn recompose(head_prefix: &str, body_prefix: &str, edited: &str, ending: LineEnding) -> String {
    let mut rewritten = String::with_capacity(edited.len());

    for (index, line) in edited.lines().enumerate() {
        let prefix = if index == 0 { head_prefix } else { body_prefix };
        rewritten.push_str(prefix);
        rewritten.push_str(line);
        rewritten.push_str(ending.as_str());
    }

    rewritten
}

/// Physical lines of `text` with their terminators split off.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = (&str, Option<LineEnding>)> {
    text.split_inclusive('\n').map(|line| {
        if let Some(stripped) = line.strip_suffix("\r\n") {
            (stripped, Some(LineEnding::CrLf))
        } else if let Some(stripped) = line.strip_suffix('\n') {
            (stripped, Some(LineEnding::Lf))
        } else {
            (line, None)
        }
    })
}
