//! Dev requirement files
//!
//! A session installs `dev-requirements/<name>.txt`. Projects that do not
//! ship their own copy of a file use the shared one under the user data
//! directory instead.

use std::path::{Path, PathBuf};

use crate::paths::DEV_REQUIREMENTS_DIR;

/// Requirement file name holding version constraints
pub const CONSTRAINTS: &str = "constraints";

/// Resolves requirement names to files and pip arguments
#[derive(Debug, Clone)]
pub struct DevRequirements {
    root: PathBuf,
    shared: Option<PathBuf>,
}

impl DevRequirements {
    /// Requirements for a project root, without a shared fallback
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            shared: None,
        }
    }

    /// Set the shared fallback directory
    #[must_use]
    pub fn with_shared(mut self, shared: Option<PathBuf>) -> Self {
        self.shared = shared;
        self
    }

    /// File for a requirement name
    ///
    /// Project-local files are returned relative to the project root. When
    /// neither copy exists the local path is returned so pip reports it.
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        let relative = Path::new(DEV_REQUIREMENTS_DIR).join(format!("{name}.txt"));
        if self.root.join(&relative).exists() {
            return relative;
        }

        self.shared
            .as_ref()
            .map(|shared| shared.join(format!("{name}.txt")))
            .filter(|path| path.exists())
            .unwrap_or(relative)
    }

    /// Whether a requirement file exists locally or in the shared directory
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        let path = self.path(name);
        if path.is_absolute() { path.exists() } else { self.root.join(path).exists() }
    }

    /// pip arguments installing `names`, optionally constrained
    ///
    /// Produces `-r <file>` per name, preceded by `-c <constraints>` when
    /// `constrain` is set and a constraints file exists.
    #[must_use]
    pub fn args(&self, names: &[&str], constrain: bool) -> Vec<String> {
        let mut args = Vec::new();
        if constrain && self.exists(CONSTRAINTS) {
            args.push("-c".to_string());
            args.push(self.path(CONSTRAINTS).display().to_string());
        }

        for name in names {
            args.push("-r".to_string());
            args.push(self.path(name).display().to_string());
        }
        args
    }

    /// Like [`Self::args`], preceded by the local project itself (`.`)
    #[must_use]
    pub fn with_project(&self, names: &[&str], constrain: bool) -> Vec<String> {
        let mut args = vec![".".to_string()];
        args.extend(self.args(names, constrain));
        args
    }
}
