//! piped - config-driven session runner for Python project tooling
//!
//! Reads the `[tool.piped]` table of a project's `pyproject.toml`, registers a
//! fixed catalog of sessions (linters, formatters, test runners, docs and
//! publishing), prunes the catalog through the configured hide-list and runs
//! the selected sessions one after another by shelling out to the wrapped tools.

#![deny(missing_docs, missing_debug_implementations, unsafe_code, unused_import_braces)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod paths;
pub mod sessions;

pub use config::Config;
pub use error::PipedError;
