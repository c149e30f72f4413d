//! `reformat` - run every formatter over the project

use std::path::Path;

use crate::core::models::Invocation;
use crate::core::services::{Session, install_deps, tracked_files};
use crate::sessions::lint::pre_commit_hook;

/// Formatters run over `top_level_targets`, in order
const TARGET_FORMATTERS: [&str; 3] = ["black", "isort", "pycln"];

/// Reformat the project's modules to fit the standard style
pub fn reformat(session: &Session<'_>) -> anyhow::Result<()> {
    install_deps(session, &session.requirements().args(&["reformat"], false), true)?;
    let targets = &session.config().top_level_targets;
    for formatter in TARGET_FORMATTERS {
        session.run(formatter, targets)?;
    }

    let tracked = tracked_files(session, true)?;
    let python_files = tracked.iter().filter(|path| is_python_source(path));

    session.log("Running sort-all");
    let sort_all = Invocation::new("sort-all")
        .args(python_files.cloned())
        .success_codes(&[0, 1])
        .quiet();
    session.run_invocation(sort_all)?;

    session.log("Running pre_commit_hooks.end_of_file_fixer");
    session.run_invocation(pre_commit_hook("end_of_file_fixer").args(&tracked))?;

    session.log("Running pre_commit_hooks.trailing_whitespace_fixer");
    session.run_invocation(pre_commit_hook("trailing_whitespace_fixer").args(&tracked))?;
    Ok(())
}

/// `*.py` or `*.pyi`, with a non-empty stem
#[must_use]
pub fn is_python_source(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext == "py" || ext == "pyi")
}
