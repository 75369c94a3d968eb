//! Shared test utilities for the doc-rewriter workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures for blame tests
//! - [`source`]: [`SourceDir`] builder for C# source trees and save files

pub mod git;
pub mod source;

pub use source::SourceDir;
