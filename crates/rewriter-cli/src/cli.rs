//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use rewriter_core::{AUTHOR_FILTER_ENV, DEFAULT_SAVE_FILE, RewriterConfig, SAVE_LOCATION_ENV, TagOrder};

/// Doc Rewriter - Walk `///` doc comments and rewrite them one by one
///
/// Every comment is opened in your editor without its indentation and
/// markers. Progress is saved, so an interrupted run picks up where it
/// stopped.
///
/// Examples:
///   doc-rewriter src/Widget.cs src/Gadget.cs
///   doc-rewriter --automatic --reorder-tags src/*.cs
///   doc-rewriter --author "Jane Doe" src/*.cs
#[derive(Parser, Debug)]
#[command(name = "doc-rewriter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not open an editor; only apply saved rewrites and tag ordering
    #[arg(long)]
    pub automatic: bool,

    /// Sort the top-level tags of every edited comment
    #[arg(long)]
    pub reorder_tags: bool,

    /// Tag order to sort by (implies --reorder-tags)
    #[arg(long, value_delimiter = ',', value_name = "TAGS")]
    pub tag_order: Vec<String>,

    /// Where progress is loaded from and saved to
    #[arg(long, env = SAVE_LOCATION_ENV, default_value = DEFAULT_SAVE_FILE)]
    pub save_file: PathBuf,

    /// Only edit comments last touched by this git author
    #[arg(long, env = AUTHOR_FILTER_ENV)]
    pub author: Option<String>,

    /// Source files to rewrite, in order
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Tag ordering requested on the command line, if any.
    pub fn tag_order(&self) -> Option<TagOrder> {
        let custom: Vec<&str> = self
            .tag_order
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();

        if !custom.is_empty() {
            Some(TagOrder::new(custom))
        } else if self.reorder_tags {
            Some(TagOrder::default())
        } else {
            None
        }
    }

    pub fn config(&self) -> RewriterConfig {
        RewriterConfig::default()
            .with_save_file(&self.save_file)
            .with_author_filter(self.author.clone())
            .with_tag_order(self.tag_order())
    }
}
