//! Interactive prompts for the rewrite session
//!
//! Uses dialoguer for terminal input.

use colored::Colorize;
use dialoguer::{Confirm, Input};
use rewriter_core::{Error, RewriterConfig, StopPrompt};

use crate::error::Result;

/// Explain what is about to happen and wait for Enter.
pub fn show_preamble(config: &RewriterConfig, editor: &str) -> Result<()> {
    println!("{}", "Doc Rewriter".green().bold());
    println!();
    println!("Each doc comment opens in {} without its indentation and `///` markers.", editor.cyan());
    println!("Save and close the editor to apply your edit.");
    println!(
        "To pause, empty the file and confirm; progress is saved to {}.",
        config.save_file.display().to_string().cyan()
    );
    if let Some(author) = &config.author_filter {
        println!("Only comments last touched by {} will be offered.", author.cyan());
    }
    if config.tag_order.is_some() {
        println!("Tags are reordered after every edit.");
    }
    println!();

    Input::<String>::new()
        .with_prompt("Press Enter to begin")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

/// Asks on the terminal whether an empty edit means stop.
pub struct ConfirmStop;

impl StopPrompt for ConfirmStop {
    fn confirm_stop(&mut self) -> rewriter_core::Result<bool> {
        Confirm::new()
            .with_prompt("Empty contents. Would you like to stop? Your progress will be saved.")
            .default(false)
            .interact()
            .map_err(|e| Error::prompt(e.to_string()))
    }
}
