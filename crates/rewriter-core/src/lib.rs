//! Comment-rewrite engine for the doc comment rewriter
//!
//! Walks `///` doc comments in source files, lets an editor rewrite each
//! comment body, normalizes tag order, and remembers every rewrite so an
//! interrupted session can pick up where it left off.
//!
//! # Architecture
//!
//! ```text
//!                 rewriter-cli
//!                      |
//!                rewriter-core
//!      session -> visitor -> padding, reorder
//!                    |
//!                  cache
//!                      |
//!          +-----------+-----------+
//!          |                       |
//!     rewriter-fs             rewriter-git
//! ```
//!
//! - [`padding`] strips and restores indentation and `///` markers
//! - [`reorder`] sorts top-level tags of a comment body
//! - [`cache`] persists raw-to-rewritten comment text
//! - [`visitor`] decides, per comment, whether and how to rewrite it
//! - [`session`] runs the visitor over a list of files
//!
//! # Example
//!
//! ```no_run
//! use rewriter_core::{RewriterConfig, Session, TagOrder};
//! use std::path::PathBuf;
//!
//! fn example() -> rewriter_core::Result<()> {
//!     let config = RewriterConfig::default().with_tag_order(Some(TagOrder::default()));
//!     let summary = Session::new(config).run(&[PathBuf::from("src/Widget.cs")])?;
//!     println!("{} files written", summary.files_written);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod padding;
pub mod reorder;
pub mod session;
pub mod source;
pub mod visitor;

pub use cache::{DEFAULT_SAVE_FILE, RewriteCache};
pub use collaborators::{Blame, EditContext, Editor, StopPrompt};
pub use config::{AUTHOR_FILTER_ENV, RewriterConfig, SAVE_LOCATION_ENV};
pub use error::{Error, Result};
pub use padding::{LineEnding, PaddedComment, PaddedLine, decompose, recompose};
pub use reorder::{DEFAULT_TAG_ORDER, TagOrder, reorder_tags};
pub use session::{RunSummary, Session};
pub use source::{DocComment, find_doc_comments};
pub use visitor::{CommentOutcome, Rewriter, RunState, RunStats};
