//! Cross-crate rewrite scenarios
//!
//! Runs whole sessions against real git repositories: blame from
//! rewriter-git feeding the author filter, the save file carrying edits
//! between runs, and files restored from git picking their rewrites back up.

use pretty_assertions::assert_eq;
use rewriter_core::{
    EditContext, Editor, Result, RewriteCache, RewriterConfig, Session, StopPrompt, TagOrder,
};
use rewriter_git::BlameIndex;
use rewriter_test_utils::SourceDir;
use rewriter_test_utils::git::{commit_as, real_git_repo_with_commit};
use std::fs;
use std::process::Command;

const SHAPES: &str = "/// <returns>Area.</returns>\n/// <summary>Circle.</summary>\nclass Circle {}\n";

struct Shout;

impl Editor for Shout {
    fn edit(&mut self, content: &str, _: &EditContext<'_>) -> Result<String> {
        Ok(content.replace("Circle.", "CIRCLE!"))
    }
}

struct KeepGoing;

impl StopPrompt for KeepGoing {
    fn confirm_stop(&mut self) -> Result<bool> {
        Ok(false)
    }
}

fn repo_with_shapes() -> SourceDir {
    let dir = SourceDir::new();
    real_git_repo_with_commit(dir.root());
    fs::write(dir.root().join("Shapes.cs"), SHAPES).unwrap();
    commit_as(dir.root(), "Alice", "Add shapes");
    dir
}

#[test]
fn test_uncommitted_comment_belongs_to_configured_user() {
    let dir = repo_with_shapes();
    let file = dir.root().join("Shapes.cs");
    let mut content = fs::read_to_string(&file).unwrap();
    content.push_str("/// <returns>Sides.</returns>\n/// <summary>Square.</summary>\nclass Square {}\n");
    fs::write(&file, content).unwrap();

    let config = RewriterConfig::default()
        .with_save_file(dir.save_file())
        .with_author_filter(Some("Test User".to_string()))
        .with_tag_order(Some(TagOrder::default()));
    let summary = Session::new(config).run(&[file]).unwrap();

    assert_eq!(summary.stats.skipped_by_author, 1);
    assert_eq!(
        dir.read("Shapes.cs"),
        "/// <returns>Area.</returns>\n/// <summary>Circle.</summary>\nclass Circle {}\n\
         /// <summary>Square.</summary>\n/// <returns>Sides.</returns>\nclass Square {}\n"
    );
}

#[test]
fn test_explicit_blame_index_matches_default() {
    let dir = repo_with_shapes();
    let file = dir.root().join("Shapes.cs");

    let config = RewriterConfig::default()
        .with_save_file(dir.save_file())
        .with_author_filter(Some("Alice".to_string()));
    let summary = Session::new(config)
        .with_editor(Shout, KeepGoing)
        .with_blame(BlameIndex::new())
        .run(&[file])
        .unwrap();

    assert_eq!(summary.stats.skipped_by_author, 0);
    dir.assert_file_contains("Shapes.cs", "/// <summary>CIRCLE!</summary>");
}

#[test]
fn test_restored_file_gets_saved_rewrite_without_editor() {
    let dir = repo_with_shapes();
    let file = dir.root().join("Shapes.cs");
    let config = RewriterConfig::default()
        .with_save_file(dir.save_file())
        .with_tag_order(Some(TagOrder::default()));

    Session::new(config.clone())
        .with_editor(Shout, KeepGoing)
        .run(std::slice::from_ref(&file))
        .unwrap();
    let rewritten = dir.read("Shapes.cs");
    assert_eq!(
        rewritten,
        "/// <summary>CIRCLE!</summary>\n/// <returns>Area.</returns>\nclass Circle {}\n"
    );

    let status = Command::new("git")
        .args(["checkout", "--", "Shapes.cs"])
        .current_dir(dir.root())
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(dir.read("Shapes.cs"), SHAPES);

    let summary = Session::new(config).run(&[file]).unwrap();

    assert_eq!(summary.stats.cache_hits, 1);
    assert_eq!(dir.read("Shapes.cs"), rewritten);
}

#[test]
fn test_save_file_is_readable_json_map() {
    let dir = repo_with_shapes();
    let file = dir.root().join("Shapes.cs");

    Session::new(RewriterConfig::default().with_save_file(dir.save_file()))
        .with_editor(Shout, KeepGoing)
        .run(&[file])
        .unwrap();

    let raw = fs::read_to_string(dir.save_file()).unwrap();
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw).unwrap();
    let cache = RewriteCache::load(&dir.save_file()).unwrap();

    assert_eq!(map.len(), cache.len());
    assert_eq!(
        cache.lookup("/// <returns>Area.</returns>\n/// <summary>Circle.</summary>\n"),
        Some("/// <returns>Area.</returns>\n/// <summary>CIRCLE!</summary>\n")
    );
}
