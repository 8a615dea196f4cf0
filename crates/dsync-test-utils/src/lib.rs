//! Shared test utilities for the dsync workspace.
//!
//! Tree fixtures shared by the crate test suites. Dev-dependency only,
//! never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for on-disk trees
//! - [`mem`]: in-memory tree helpers

pub mod mem;
pub mod tree;

pub use mem::{file_map, mem_tree};
pub use tree::TestTree;
