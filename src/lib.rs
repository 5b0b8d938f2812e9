//! Reader for multi-level roll-up weight summary sheets.
//!
//! A summary CSV stacks one block per hierarchy level (`#1レベル名` …
//! `#5レベル名`). [`summary::parse_file`] rebuilds the component tree from
//! it, and [`summary::project_level`] / [`summary::project_column`] flatten
//! parts of the tree back into tables for display or export.

pub mod config;
pub mod error;
pub mod grid;
pub mod json_export;
pub mod render;
pub mod summary;
pub mod utils;

pub use error::{Result, RollupError};
