//! Doc Rewriter CLI
//!
//! Walks the `///` doc comments of the given source files and rewrites them
//! in an external editor, or automatically with `--automatic`.

mod cli;
mod editor;
mod error;
mod interactive;

use std::io::IsTerminal;

use clap::Parser;
use colored::Colorize;
use rewriter_core::{RunSummary, Session};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;
use editor::ExternalEditor;
use error::{CliError, Result};
use interactive::ConfirmStop;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = cli.config();
    let summary = if cli.automatic {
        Session::new(config).run(&cli.files)?
    } else {
        let editor = ExternalEditor::from_env();
        interactive::show_preamble(&config, editor.command())?;
        Session::new(config)
            .with_editor(editor, ConfirmStop)
            .run(&cli.files)?
    };

    report(&summary, cli.automatic);
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`, `debug` with `--verbose`).
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| CliError::user(format!("Failed to set up logging: {e}")))?;

    tracing::debug!("Verbose mode enabled");
    Ok(())
}

fn report(summary: &RunSummary, automatic: bool) {
    let stats = &summary.stats;

    if summary.stopped {
        println!(
            "{} Progress saved to {}; run again with the same files to continue.",
            "Stopped.".yellow().bold(),
            summary.save_file.display()
        );
    } else {
        println!(
            "{} {} of {} comments rewritten, {} files written.",
            "Done.".green().bold(),
            stats.comments_rewritten,
            stats.comments_seen,
            summary.files_written
        );
    }

    if summary.has_errors() {
        eprintln!(
            "{}: Errors encountered during at least one edit ({} failed). Run the program again with the same files to retry only the failed edits.",
            "warning".yellow().bold(),
            stats.edit_errors
        );
        if automatic {
            eprintln!(
                "Since you're in automatic mode, consider removing --automatic and fixing any invalid XML by hand."
            );
        }
    }
}
