//! Filesystem layer for the doc comment rewriter
//!
//! Reads source files and save files, and writes them back atomically so an
//! interrupted run never leaves a half-written source file behind.

pub mod error;
pub mod io;

pub use error::{Error, Result};
pub use io::{read_text, read_text_if_exists, write_atomic, write_text};
