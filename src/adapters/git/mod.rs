//! Git integration adapter
//!
//! Implements `VersionControl` by reading the repository index through
//! libgit2, the same listing `git ls-files` prints.

use std::path::{Path, PathBuf};

use anyhow::Context;
use git2::Repository;

use crate::core::ports::VersionControl;

/// Git-based version control implementation
#[derive(Debug, Clone)]
pub struct GitVersionControl {
    /// Working directory
    workdir: PathBuf,
}

impl GitVersionControl {
    /// Create a new git version control adapter
    #[must_use]
    pub const fn new(workdir: PathBuf) -> Self {
        Self { workdir }
    }

    /// Path of the working directory relative to the repository root
    fn prefix(&self, repo: &Repository) -> PathBuf {
        let Some(root) = repo.workdir().and_then(|root| root.canonicalize().ok()) else {
            return PathBuf::new();
        };
        self.workdir
            .canonicalize()
            .ok()
            .and_then(|dir| dir.strip_prefix(&root).ok().map(Path::to_path_buf))
            .unwrap_or_default()
    }
}

impl VersionControl for GitVersionControl {
    fn tracked_files(&self) -> anyhow::Result<Vec<String>> {
        let repo = Repository::discover(&self.workdir)
            .with_context(|| format!("{} is not inside a git repository", self.workdir.display()))?;
        let index = repo.index().context("failed to read git index")?;
        let prefix = self.prefix(&repo);

        let mut files: Vec<String> = index
            .iter()
            .filter_map(|entry| {
                let path = PathBuf::from(String::from_utf8_lossy(&entry.path).into_owned());
                path.strip_prefix(&prefix)
                    .ok()
                    .map(|relative| relative.to_string_lossy().replace('\\', "/"))
            })
            .collect();

        // Unmerged paths appear once per conflict stage
        files.dedup();
        Ok(files)
    }
}
