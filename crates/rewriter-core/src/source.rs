//! Locating `///` doc comment blocks in source text
//!
//! A line-based scanner: a block is a run of consecutive lines whose first
//! non-whitespace characters are exactly `///`. Lines starting with `////`
//! are ordinary comments and end a block.

use std::ops::Range;

use crate::padding::split_lines;

const DOC_MARKER: &str = "///";

/// One doc comment block found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment<'a> {
    /// Raw text from the first marker through the last line's terminator
    pub text: &'a str,
    /// Byte span of `text` within the source
    pub span: Range<usize>,
    /// Whitespace before the first marker; belongs to the source, not the comment
    pub indent: &'a str,
    /// 1-based line of the first comment line
    pub first_line: usize,
    /// 1-based line of the last comment line
    pub last_line: usize,
}

impl DocComment<'_> {
    /// Line of the declaration the comment documents.
    pub fn declaration_line(&self) -> usize {
        self.last_line + 1
    }
}

/// Find every doc comment block in `source`, in document order.
pub fn find_doc_comments(source: &str) -> Vec<DocComment<'_>> {
    let mut comments = Vec::new();
    let mut current: Option<(usize, usize, &str, usize)> = None;
    let mut offset = 0;
    let mut last_end = 0;

    for (index, (line, ending)) in split_lines(source).enumerate() {
        let line_number = index + 1;
        let line_start = offset;
        offset += line.len() + ending.map(|e| e.as_str().len()).unwrap_or_default();

        let trimmed = line.trim_start();
        let is_doc_line = trimmed.starts_with(DOC_MARKER) && !trimmed.starts_with("////");

        if is_doc_line {
            if current.is_none() {
                let indent = &line[..line.len() - trimmed.len()];
                current = Some((line_start + indent.len(), line_number, indent, line_number));
            }
            if let Some(block) = current.as_mut() {
                block.3 = line_number;
            }
            last_end = offset;
        } else if let Some((start, first_line, indent, last_line)) = current.take() {
            comments.push(DocComment {
                text: &source[start..last_end],
                span: start..last_end,
                indent,
                first_line,
                last_line,
            });
        }
    }

    if let Some((start, first_line, indent, last_line)) = current {
        comments.push(DocComment {
            text: &source[start..last_end],
            span: start..last_end,
            indent,
            first_line,
            last_line,
        });
    }

    comments
}
