//! Session context
//!
//! A [`Session`] is what a session callback sees: its name, the positional
//! arguments passed after `--`, the project root, the environment its tools
//! run with, and handles to the subprocess and version-control ports.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::models::Invocation;
use crate::core::ports::{CommandRunner, RunOutput, VersionControl};
use crate::core::services::options::find_option;
use crate::core::services::requirements::DevRequirements;
use crate::paths;

/// Per-run context handed to a session callback
#[derive(Debug)]
pub struct Session<'a> {
    name: String,
    posargs: Vec<String>,
    root: PathBuf,
    manifest: PathBuf,
    env: BTreeMap<String, String>,
    environment: Option<PathBuf>,
    shared_requirements: Option<PathBuf>,
    config: &'a Config,
    runner: &'a dyn CommandRunner,
    vcs: &'a dyn VersionControl,
}

impl<'a> Session<'a> {
    /// Create a session rooted at the current directory with an empty environment
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        config: &'a Config,
        runner: &'a dyn CommandRunner,
        vcs: &'a dyn VersionControl,
    ) -> Self {
        let root = PathBuf::from(".");
        Self {
            name: name.into(),
            posargs: Vec::new(),
            manifest: root.join(paths::MANIFEST),
            root,
            env: BTreeMap::new(),
            environment: None,
            shared_requirements: None,
            config,
            runner,
            vcs,
        }
    }

    /// Set the positional arguments
    #[must_use]
    pub fn with_posargs(mut self, posargs: Vec<String>) -> Self {
        self.posargs = posargs;
        self
    }

    /// Set the project root; the manifest is assumed to live there
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self.manifest = self.root.join(paths::MANIFEST);
        self
    }

    /// Set the manifest path
    #[must_use]
    pub fn with_manifest(mut self, manifest: impl Into<PathBuf>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// Set the base environment variables
    #[must_use]
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Set the shared dev-requirements fallback directory
    #[must_use]
    pub fn with_shared_requirements(mut self, dir: Option<PathBuf>) -> Self {
        self.shared_requirements = dir;
        self
    }

    /// Activate an environment: its executables shadow everything on `PATH`
    #[must_use]
    pub fn with_environment(mut self, env_dir: &Path) -> Self {
        let mut search = vec![paths::env_bin_dir(env_dir)];
        if let Some(existing) = self.env.get("PATH") {
            search.extend(std::env::split_paths(existing));
        }
        if let Ok(joined) = std::env::join_paths(search) {
            self.env.insert("PATH".to_string(), joined.to_string_lossy().into_owned());
        }
        self.env.insert("VIRTUAL_ENV".to_string(), env_dir.display().to_string());
        self.environment = Some(env_dir.to_path_buf());
        self
    }

    /// Session name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positional arguments passed after `--`
    #[must_use]
    pub fn posargs(&self) -> &[String] {
        &self.posargs
    }

    /// Project root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Manifest path
    #[must_use]
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    /// Environment variables every invocation runs with
    #[must_use]
    pub const fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Active environment directory, if any
    #[must_use]
    pub fn environment(&self) -> Option<&Path> {
        self.environment.as_deref()
    }

    /// Project configuration
    #[must_use]
    pub const fn config(&self) -> &'a Config {
        self.config
    }

    /// Version control port
    #[must_use]
    pub const fn vcs(&self) -> &'a dyn VersionControl {
        self.vcs
    }

    /// Dev requirement files for this project
    #[must_use]
    pub fn requirements(&self) -> DevRequirements {
        DevRequirements::new(&self.root).with_shared(self.shared_requirements.clone())
    }

    /// Resolve a project-relative path
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Render a path relative to the project root when possible
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root).unwrap_or(path).display().to_string()
    }

    /// Scan the positional arguments for a flag's value
    #[must_use]
    pub fn find_option(&self, names: &[&str], when_empty: Option<&str>) -> Option<String> {
        find_option(&self.posargs, names, when_empty)
    }

    /// Log a session message
    pub fn log(&self, message: impl Display) {
        log::info!("{}: {message}", self.name);
    }

    /// Log a session warning
    pub fn warn(&self, message: impl Display) {
        log::warn!("{}: {message}", self.name);
    }

    /// Run a program that must exit with 0
    pub fn run<I, S>(&self, program: &str, args: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run_invocation(Invocation::new(program).args(args))?;
        Ok(())
    }

    /// Run an invocation inside this session
    ///
    /// The invocation's own environment overrides the session's, and it runs
    /// from the project root unless it names another directory.
    ///
    /// # Errors
    ///
    /// Fails when the program cannot be started or exits with a code the
    /// invocation does not accept.
    pub fn run_invocation(&self, invocation: Invocation) -> anyhow::Result<RunOutput> {
        let mut env = self.env.clone();
        env.extend(invocation.env.clone());
        let cwd = invocation.cwd.clone().unwrap_or_else(|| self.root.clone());
        let invocation = invocation.with_env(env).current_dir(cwd);

        if invocation.log {
            log::info!("{}: {invocation}", self.name);
        } else {
            log::debug!("{}: {invocation}", self.name);
        }

        let output = self.runner.run(&invocation)?;
        Ok(output.check(&invocation)?)
    }

    /// `python -m pip install <args>` in the session environment
    pub fn install<I, S>(&self, args: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pip = ["-m", "pip", "install"].into_iter().map(String::from);
        self.run("python", pip.chain(args.into_iter().map(Into::into)))
    }
}
