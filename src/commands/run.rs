//! Run the selected sessions

use std::collections::BTreeMap;
use std::path::PathBuf;

use piped::Config;
use piped::adapters::git::GitVersionControl;
use piped::adapters::process::{DryRunRunner, ProcessRunner};
use piped::core::ports::CommandRunner;
use piped::core::services::{Driver, EnvironmentPolicy, Registry, RunOptions};
use piped::output::OutputMode;
use piped::{paths, sessions};

/// Everything the CLI collected for a run
#[derive(Debug)]
pub struct RunRequest {
    /// Manifest path
    pub manifest: PathBuf,
    /// Requested sessions
    pub sessions: Vec<String>,
    /// Tag filter
    pub tags: Vec<String>,
    /// Arguments after `--`
    pub posargs: Vec<String>,
    /// Stop after the first failure
    pub stop_on_first_error: bool,
    /// Environment overrides
    pub environment: EnvironmentPolicy,
    /// Print commands instead of running them
    pub dry_run: bool,
}

/// Load the configuration, run the sessions and report; returns the exit code
pub fn run(request: RunRequest, mode: OutputMode) -> anyhow::Result<u8> {
    let config = Config::load(&request.manifest)?;
    let mut registry = Registry::new();
    sessions::register_all(&mut registry, &config)?;

    let runner: Box<dyn CommandRunner> = if request.dry_run {
        Box::new(DryRunRunner)
    } else {
        Box::new(ProcessRunner)
    };
    let vcs = GitVersionControl::new(paths::project_root(&request.manifest));

    let driver = Driver::new(&config, &registry, runner.as_ref(), &vcs)
        .with_manifest(&request.manifest)
        .with_env(process_env())
        .with_shared_requirements(paths::shared_requirements_dir());

    let options = RunOptions {
        sessions: request.sessions,
        tags: request.tags,
        posargs: request.posargs,
        stop_on_first_error: request.stop_on_first_error,
        environment: request.environment,
        provision: !request.dry_run,
    };

    let summary = driver.run(&options)?;
    summary.render(mode);
    Ok(summary.exit_code())
}

/// The caller's environment; variables that are not valid UTF-8 are still
/// inherited by child processes, they just cannot be read by sessions
fn process_env() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
