//! Persistent rewrite cache
//!
//! Maps the exact raw text of every processed doc comment to the text it was
//! rewritten to. The cache is loaded once before a run and saved once after
//! it, which makes interrupted sessions safe to resume.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Default save file name, relative to the working directory.
pub const DEFAULT_SAVE_FILE: &str = "RewriterSavedState.json";

/// Raw comment text to replacement text.
///
/// Persisted as a flat JSON object. Keys are kept sorted so the save file is
/// stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewriteCache {
    entries: BTreeMap<String, String>,
}

impl RewriteCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cache from `path`.
    ///
    /// A missing file yields an empty cache. An unreadable or corrupt file is
    /// an error; a run must not start over an existing save it cannot read.
    pub fn load(path: &Path) -> Result<Self> {
        let Some(content) = rewriter_fs::read_text_if_exists(path)? else {
            tracing::debug!(path = %path.display(), "no save file, starting fresh");
            return Ok(Self::new());
        };

        let cache: Self = serde_json::from_str(&content).map_err(|source| Error::CacheCorrupt {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            path = %path.display(),
            entries = cache.len(),
            "Using save from {}",
            path.display()
        );
        Ok(cache)
    }

    /// Save the cache to `path` atomically as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        rewriter_fs::write_text(path, &content)?;

        tracing::info!(
            path = %path.display(),
            entries = self.len(),
            "Wrote save to {}",
            path.display()
        );
        Ok(())
    }

    /// Replacement previously recorded for `raw`, if any.
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        self.entries.get(raw).map(String::as_str)
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.entries.contains_key(raw)
    }

    /// Record that `raw` was rewritten to `replacement`.
    ///
    /// The first write for a key wins; later writes for the same key are
    /// ignored. The replacement is also registered as a key mapping to
    /// itself, so text produced by an earlier pass is recognized as done.
    ///
    /// Returns `true` if `raw` was not already present.
    pub fn record(&mut self, raw: &str, replacement: &str) -> bool {
        let inserted = self.insert_first(raw, replacement);
        self.insert_first(replacement, replacement);
        inserted
    }

    fn insert_first(&mut self, key: &str, value: &str) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
