//! CLI end-to-end tests that invoke the compiled `doc-rewriter` binary.
//!
//! Only `--automatic` runs are exercised here; interactive runs need a
//! terminal and are covered by the session tests in rewriter-core.

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rewriter_test_utils::SourceDir;
use std::fs;

const MISORDERED: &str = "    /// <returns>Speed.</returns>\n    /// <summary>Spins.</summary>\n    int Spin();\n";
const ORDERED: &str = "    /// <summary>Spins.</summary>\n    /// <returns>Speed.</returns>\n    int Spin();\n";

/// `doc-rewriter` run from `dir` with the save location pinned to it.
fn doc_rewriter(dir: &SourceDir) -> Command {
    let mut cmd = Command::cargo_bin("doc-rewriter").unwrap();
    cmd.current_dir(dir.root())
        .env_remove("REWRITER_SAVE_LOCATION")
        .env_remove("REWRITER_GIT_AUTHOR_NAME")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_exits_zero() {
    let dir = SourceDir::new();

    doc_rewriter(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--automatic"))
        .stdout(predicate::str::contains("--reorder-tags"));
}

#[test]
fn test_no_files_is_a_usage_error() {
    let dir = SourceDir::new();

    doc_rewriter(&dir)
        .arg("--automatic")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FILES"));
}

#[test]
fn test_automatic_reorder_rewrites_file_and_saves_progress() {
    let dir = SourceDir::new();
    dir.write("Spinner.cs", MISORDERED);

    doc_rewriter(&dir)
        .args(["--automatic", "--reorder-tags", "Spinner.cs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done."))
        .stderr(predicate::str::contains("Current file: Spinner.cs"))
        .stderr(predicate::str::contains("Nothing left to do!"));

    assert_eq!(dir.read("Spinner.cs"), ORDERED);
    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.save_file()).unwrap()).unwrap();
    assert!(saved.get("/// <returns>Speed.</returns>\n    /// <summary>Spins.</summary>\n").is_some());
}

#[test]
fn test_automatic_without_reorder_changes_nothing() {
    let dir = SourceDir::new();
    dir.write("Spinner.cs", MISORDERED);

    doc_rewriter(&dir)
        .args(["--automatic", "Spinner.cs"])
        .assert()
        .success();

    assert_eq!(dir.read("Spinner.cs"), MISORDERED);
}

#[test]
fn test_custom_tag_order() {
    let dir = SourceDir::new();
    dir.write("Spinner.cs", ORDERED);

    doc_rewriter(&dir)
        .args(["--automatic", "--tag-order", "returns,summary", "Spinner.cs"])
        .assert()
        .success();

    assert_eq!(dir.read("Spinner.cs"), MISORDERED);
}

#[test]
fn test_save_location_from_environment() {
    let dir = SourceDir::new();
    dir.write("Spinner.cs", MISORDERED);

    doc_rewriter(&dir)
        .env("REWRITER_SAVE_LOCATION", "progress.json")
        .args(["--automatic", "--reorder-tags", "Spinner.cs"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote save to progress.json"));

    assert!(dir.root().join("progress.json").exists());
    assert!(!dir.save_file().exists());
}

#[test]
fn test_invalid_markup_is_a_warning() {
    let dir = SourceDir::new();
    dir.write("Broken.cs", "/// <summary>unclosed\nint Broken();\n");

    doc_rewriter(&dir)
        .args(["--automatic", "--reorder-tags", "Broken.cs"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Errors encountered during at least one edit"))
        .stderr(predicate::str::contains("removing --automatic"));

    assert_eq!(dir.read("Broken.cs"), "/// <summary>unclosed\nint Broken();\n");
}

#[test]
fn test_missing_file_exits_one() {
    let dir = SourceDir::new();

    doc_rewriter(&dir)
        .args(["--automatic", "Missing.cs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_corrupt_save_file_exits_one() {
    let dir = SourceDir::new();
    dir.write("Spinner.cs", MISORDERED);
    fs::write(dir.save_file(), "not json").unwrap();

    doc_rewriter(&dir)
        .args(["--automatic", "--reorder-tags", "Spinner.cs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("corrupt"));

    assert_eq!(dir.read("Spinner.cs"), MISORDERED);
}
