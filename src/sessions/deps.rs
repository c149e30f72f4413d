//! `freeze-dev-deps` and `verify-dev-deps`
//!
//! Requirement sources live in `dev-requirements/*.in` and compile to pinned
//! `*.txt` files. `constraints.in` is generated from the project's own
//! dependencies so every session installs against the same pins.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::adapters::toml::{ProjectMetadata, read_manifest};
use crate::core::services::{Session, install_deps};
use crate::paths::DEV_REQUIREMENTS_DIR;

/// Interpreter range requirement files are compiled for
const MIN_PYTHON_VERSION: &str = "3.9,<3.12";

/// Recompile the dev requirement files
///
/// Positional arguments restrict the run to those `.in` files; without them
/// `constraints.in` is regenerated from `[project]` first.
pub fn freeze_dev_deps(session: &Session<'_>) -> anyhow::Result<()> {
    install_deps(session, &session.requirements().args(&["publish"], false), true)?;
    let selected = selected_paths(session);
    let dev_dir = session.path(DEV_REQUIREMENTS_DIR);

    if selected.is_none() {
        write_constraints(session, &dev_dir)?;
    }

    for path in list_files(&dev_dir, "in")? {
        if !is_selected(selected.as_ref(), &path) {
            continue;
        }

        let target = path.with_extension("txt");
        remove_if_exists(&target)?;
        session.run(
            "pip-compile-cross-platform",
            [
                "-o".to_string(),
                session.display_path(&target),
                "--min-python-version".to_string(),
                MIN_PYTHON_VERSION.to_string(),
                session.display_path(&path),
            ],
        )?;
    }

    Ok(())
}

/// Check that every pinned requirement file resolves
pub fn verify_dev_deps(session: &Session<'_>) -> anyhow::Result<()> {
    let selected = selected_paths(session);

    for path in list_files(&session.path(DEV_REQUIREMENTS_DIR), "txt")? {
        if is_selected(selected.as_ref(), &path) {
            session.install(["--dry-run".to_string(), "-r".to_string(), session.display_path(&path)])?;
        }
    }

    Ok(())
}

fn write_constraints(session: &Session<'_>, dev_dir: &Path) -> anyhow::Result<()> {
    let manifest = read_manifest(session.manifest())?;
    let deps = ProjectMetadata::from_manifest(&manifest)?.all_dependencies();
    let constraints_in = dev_dir.join("constraints.in");

    if deps.is_empty() {
        remove_if_exists(&constraints_in)?;
        remove_if_exists(&dev_dir.join("constraints.txt"))?;
        return Ok(());
    }

    fs::create_dir_all(dev_dir).with_context(|| format!("failed to create {}", dev_dir.display()))?;
    fs::write(&constraints_in, deps.join("\n") + "\n")
        .with_context(|| format!("failed to write {}", constraints_in.display()))?;
    session.log(format!("Wrote {} constraint(s) to {}", deps.len(), session.display_path(&constraints_in)));
    Ok(())
}

/// Files passed as positional arguments, resolved against the project root
fn selected_paths(session: &Session<'_>) -> Option<BTreeSet<PathBuf>> {
    if session.posargs().is_empty() {
        return None;
    }

    Some(session.posargs().iter().map(|arg| resolve(&session.path(arg))).collect())
}

fn is_selected(selected: Option<&BTreeSet<PathBuf>>, path: &Path) -> bool {
    selected.is_none_or(|paths| paths.contains(&resolve(path)))
}

fn resolve(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// `<dir>/*.<extension>`, sorted
fn list_files(dir: &Path, extension: &str) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.{extension}", glob::Pattern::escape(&dir.to_string_lossy()));
    let mut files = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern {pattern}"))?
        .collect::<Result<Vec<_>, _>>()?;
    files.sort();
    Ok(files)
}

fn remove_if_exists(path: &Path) -> anyhow::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            Err(err).with_context(|| format!("failed to remove {}", path.display()))
        },
        _ => Ok(()),
    }
}
