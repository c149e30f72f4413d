//! Session driver
//!
//! Resolves which sessions to run and runs them strictly one after another.
//! A failing session is recorded and, unless asked to stop on the first
//! error, the remaining sessions still run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::core::ports::{CommandRunner, VersionControl};
use crate::core::services::environment::{self, EnvironmentPolicy};
use crate::core::services::registry::{RegisteredSession, Registry};
use crate::core::services::session::Session;
use crate::error::{PipedError, exit_code_of};
use crate::output::{RunSummary, SessionOutcome};
use crate::paths;

/// What to run and how
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Requested session names; empty means `default_sessions`
    pub sessions: Vec<String>,
    /// Only run sessions carrying one of these tags
    pub tags: Vec<String>,
    /// Positional arguments handed to every session
    pub posargs: Vec<String>,
    /// Stop after the first failing session
    pub stop_on_first_error: bool,
    /// Environment overrides
    pub environment: EnvironmentPolicy,
    /// Create session environments before running
    pub provision: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            tags: Vec::new(),
            posargs: Vec::new(),
            stop_on_first_error: false,
            environment: EnvironmentPolicy::default(),
            provision: true,
        }
    }
}

/// Selects and runs registered sessions
#[derive(Debug)]
pub struct Driver<'a> {
    config: &'a Config,
    registry: &'a Registry,
    runner: &'a dyn CommandRunner,
    vcs: &'a dyn VersionControl,
    root: PathBuf,
    manifest: PathBuf,
    env: BTreeMap<String, String>,
    shared_requirements: Option<PathBuf>,
}

impl<'a> Driver<'a> {
    /// Driver rooted at the current directory with an empty base environment
    #[must_use]
    pub fn new(
        config: &'a Config,
        registry: &'a Registry,
        runner: &'a dyn CommandRunner,
        vcs: &'a dyn VersionControl,
    ) -> Self {
        let root = PathBuf::from(".");
        Self {
            config,
            registry,
            runner,
            vcs,
            manifest: root.join(paths::MANIFEST),
            root,
            env: BTreeMap::new(),
            shared_requirements: None,
        }
    }

    /// Set the project root and manifest path
    ///
    /// The root is made absolute: environment paths are handed to tools that
    /// run from inside it.
    #[must_use]
    pub fn with_manifest(mut self, manifest: &Path) -> Self {
        let root = paths::project_root(manifest);
        self.root = std::path::absolute(&root).unwrap_or(root);
        self.manifest = manifest.to_path_buf();
        self
    }

    /// Set the base environment every session starts from
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

    /// Resolve the sessions to run, in order and without repeats
    ///
    /// # Errors
    ///
    /// Returns [`PipedError::UnknownSessions`] when any requested name (or
    /// default session) is not registered, hidden ones included.
    pub fn select(&self, requested: &[String], tags: &[String]) -> Result<Vec<&'a RegisteredSession>, PipedError> {
        let names: Vec<String> = if !requested.is_empty() {
            requested.to_vec()
        } else if !tags.is_empty() {
            self.registry.sessions().iter().map(|s| s.name.clone()).collect()
        } else {
            self.config.default_sessions.clone()
        };

        let mut selected: Vec<&'a RegisteredSession> = Vec::new();
        let mut unknown = Vec::new();
        for name in &names {
            let resolved = self.registry.resolve(name);
            if resolved.is_empty() {
                unknown.push(name.clone());
            }
            for session in resolved {
                if !selected.iter().any(|s| s.name == session.name) {
                    selected.push(session);
                }
            }
        }

        if !unknown.is_empty() {
            return Err(PipedError::UnknownSessions(unknown));
        }

        if !tags.is_empty() {
            selected.retain(|s| s.has_any_tag(tags));
        }
        Ok(selected)
    }

    /// Run the selected sessions sequentially
    ///
    /// # Errors
    ///
    /// Only selection errors are returned; session failures are recorded in
    /// the summary.
    pub fn run(&self, options: &RunOptions) -> anyhow::Result<RunSummary> {
        let selected = self.select(&options.sessions, &options.tags)?;
        let mut summary = RunSummary::default();

        for session in selected {
            log::info!("Running session {}", session.name);
            let started = Instant::now();

            match self.run_session(session, options) {
                Ok(()) => {
                    log::info!("Session {} was successful", session.name);
                    summary.sessions.push(SessionOutcome::success(&session.name, started.elapsed()));
                },
                Err(err) => {
                    log::error!("Session {} failed: {err:#}", session.name);
                    summary.sessions.push(SessionOutcome::failed(
                        &session.name,
                        exit_code_of(&err),
                        format!("{err:#}"),
                        started.elapsed(),
                    ));
                    if options.stop_on_first_error {
                        break;
                    }
                },
            }
        }

        Ok(summary)
    }

    fn run_session(&self, registered: &RegisteredSession, options: &RunOptions) -> anyhow::Result<()> {
        let environment = if options.provision {
            environment::provision(self.runner, &self.root, registered, options.environment)?
        } else {
            None
        };

        let mut session = Session::new(&registered.name, self.config, self.runner, self.vcs)
            .with_root(&self.root)
            .with_manifest(&self.manifest)
            .with_env(self.env.clone())
            .with_posargs(options.posargs.clone())
            .with_shared_requirements(self.shared_requirements.clone());
        if let Some(dir) = environment {
            session = session.with_environment(&dir);
        }

        registered.call(&session)
    }
}
