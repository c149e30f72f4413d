//! piped - config-driven session runner for Python project tooling
//!
//! Runs the linters, formatters, test runners and publishers a project
//! configures in `[tool.piped]` through one uniform command line.

#![deny(missing_docs, missing_debug_implementations, unsafe_code, unused_import_braces)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;
mod commands;

use std::process::ExitCode;

/// Main entry point for the piped CLI
fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        },
    }
}
