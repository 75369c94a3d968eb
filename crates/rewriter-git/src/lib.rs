//! Git abstraction for the doc comment rewriter
//!
//! Answers one question: which authors last touched a range of lines in a
//! working-tree file.

pub mod blame;
pub mod error;

pub use blame::BlameIndex;
pub use error::{Error, Result};
