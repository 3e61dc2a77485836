//! Core operations.
//!
//! This module contains the business logic for matmig commands,
//! separated from CLI argument parsing and output rendering.

pub mod check_data;
pub mod update;

pub use check_data::check_data;
pub use update::{build_upgrader, plan};
