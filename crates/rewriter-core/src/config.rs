//! Resolved run configuration

use std::path::PathBuf;

use crate::cache::DEFAULT_SAVE_FILE;
use crate::reorder::TagOrder;

/// Environment variable holding the save file location.
pub const SAVE_LOCATION_ENV: &str = "REWRITER_SAVE_LOCATION";

/// Environment variable holding the git author name to filter by.
pub const AUTHOR_FILTER_ENV: &str = "REWRITER_GIT_AUTHOR_NAME";

/// Settings for one rewrite session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriterConfig {
    /// Where the rewrite cache is loaded from and saved to
    pub save_file: PathBuf,
    /// Only comments touched by this git author are edited
    pub author_filter: Option<String>,
    /// Reorder tags after each edit; `None` leaves edits as written
    pub tag_order: Option<TagOrder>,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            save_file: PathBuf::from(DEFAULT_SAVE_FILE),
            author_filter: None,
            tag_order: None,
        }
    }
}

impl RewriterConfig {
    pub fn with_save_file(mut self, save_file: impl Into<PathBuf>) -> Self {
        self.save_file = save_file.into();
        self
    }

    /// Set the author filter; blank names are treated as no filter.
    pub fn with_author_filter(mut self, author: Option<String>) -> Self {
        self.author_filter = author.filter(|a| !a.trim().is_empty());
        self
    }

    pub fn with_tag_order(mut self, tag_order: Option<TagOrder>) -> Self {
        self.tag_order = tag_order;
        self
    }
}
