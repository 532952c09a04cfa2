//! Shared test utilities for the treesum workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`](tree::TestTree) builder for a file tree plus
//!   checksum databases living next to it

pub mod tree;

pub use tree::{TestTree, digest_of};
