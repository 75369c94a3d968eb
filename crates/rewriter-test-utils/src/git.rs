//! Git repository fixtures backed by the `git` CLI.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run `git` with `args` in `path`, panicking with stderr on failure.
fn run_git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Initialises a real git repository with an initial commit using the `git` CLI.
///
/// Configures `user.email`, `user.name` (`Test User`) and disables commit
/// signing, then commits a `README.md`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    run_git(path, &["init"]);
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));

    run_git(path, &["add", "."]);
    run_git(path, &["commit", "-m", "Initial commit"]);
}

/// Stage everything in `path` and commit it with `author` as the author name.
///
/// # Panics
/// Panics if staging or committing fails.
pub fn commit_as(path: &Path, author: &str, message: &str) {
    let author_arg = format!("--author={author} <{}@example.com>", author.to_lowercase());
    run_git(path, &["add", "."]);
    run_git(path, &["commit", &author_arg, "-m", message]);
}
