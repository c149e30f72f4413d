//! `cleanup` - remove temporary artifacts left by other sessions

use std::fs;
use std::io;

use crate::core::services::Session;

/// Directories removed by `cleanup`
pub const DIRECTORIES: [&str; 5] = ["./dist", "./site", "./.piped", "./.pytest_cache", "./coverage_html"];

/// Files removed by `cleanup`
pub const FILES: [&str; 2] = ["./.coverage", "./coverage_html.xml"];

/// Remove build, docs, coverage and environment artifacts
///
/// Every path is attempted; failures are only warned about.
pub fn cleanup(session: &Session<'_>) -> anyhow::Result<()> {
    for raw_path in DIRECTORIES {
        report(session, raw_path, fs::remove_dir_all(session.path(raw_path)));
    }

    for raw_path in FILES {
        report(session, raw_path, fs::remove_file(session.path(raw_path)));
    }

    Ok(())
}

fn report(session: &Session<'_>, raw_path: &str, result: io::Result<()>) {
    match result {
        Ok(()) => session.log(format!("[  OK  ] Removed '{raw_path}'")),
        Err(err) => session.warn(format!("[ FAIL ] Failed to remove '{raw_path}': {err}")),
    }
}
