//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `toml/` - `pyproject.toml` parsing
//! - `git/` - Tracked file enumeration through libgit2
//! - `process` - Subprocess execution (real and dry-run)

pub mod git;
pub mod process;
pub mod toml;
