//! Core utilities and types for matmig.
//!
//! This crate provides fundamental types shared by the change-data tables,
//! the rule engine and the CLI.

mod file;
mod span;
mod text;
mod version;

// File operations
pub use file::{File, WriteResult};
// Source positions
pub use span::Span;
// Token matching
pub use text::{find_token_matches, is_token_byte, split_class_list, strip_quotes};
pub use version::Version;
