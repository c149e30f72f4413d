//! Shared test fixtures and fakes
//!
//! In-memory implementations of the port traits plus a scratch project
//! directory, so sessions can run without touching real tools.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use piped::Config;
use piped::core::models::Invocation;
use piped::core::ports::{CommandRunner, RunOutput, VersionControl};
use piped::core::services::Session;
use tempfile::TempDir;

/// Minimal manifest used by most tests
pub const MANIFEST: &str = r#"
[project]
name = "yuyo"
dependencies = ["alluka>=0.1.2"]

[tool.piped]
default_sessions = ["test"]
hide = ["publish"]
path_ignore = "vendor/"
project_name = "yuyo"
top_level_targets = ["./tests", "./yuyo"]
"#;

/// Parse a manifest snippet
pub fn config(manifest: &str) -> Config {
    Config::parse(manifest, Path::new("pyproject.toml")).expect("valid manifest")
}

/// The configuration from [`MANIFEST`]
pub fn sample_config() -> Config {
    config(MANIFEST)
}

/// Runner that records every invocation instead of running it
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    exit_codes: HashMap<String, i32>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` exit with `code`
    pub fn exiting(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    /// Recorded invocations
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Recorded invocations rendered as command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }

    /// Recorded invocations of `program`
    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|invocation| invocation.program == program)
            .cloned()
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> anyhow::Result<RunOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        let code = self.exit_codes.get(&invocation.program).copied().unwrap_or(0);
        Ok(RunOutput {
            code: Some(code),
            stdout: String::new(),
        })
    }
}

/// Version control fake with a fixed file list
#[derive(Debug, Default)]
pub struct FakeVcs {
    files: Vec<String>,
    queries: Cell<usize>,
}

impl FakeVcs {
    pub fn new(files: &[&str]) -> Self {
        Self {
            files: files.iter().map(ToString::to_string).collect(),
            queries: Cell::new(0),
        }
    }

    /// How often the file list was requested
    pub fn queries(&self) -> usize {
        self.queries.get()
    }
}

impl VersionControl for FakeVcs {
    fn tracked_files(&self) -> anyhow::Result<Vec<String>> {
        self.queries.set(self.queries.get() + 1);
        Ok(self.files.clone())
    }
}

/// A scratch project directory
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Empty project with the sample manifest
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        };
        project.add_file("pyproject.toml", MANIFEST);
        project
    }

    /// Root of the project
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories
    pub fn add_file(&self, path: &str, content: &str) {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Add an empty directory
    pub fn add_dir(&self, path: &str) {
        fs::create_dir_all(self.dir.path().join(path)).unwrap();
    }

    /// Whether a project-relative path exists
    pub fn exists(&self, path: &str) -> bool {
        self.dir.path().join(path).exists()
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Session rooted in `project` with the given positional arguments
pub fn session<'a>(
    name: &str,
    config: &'a Config,
    runner: &'a RecordingRunner,
    vcs: &'a FakeVcs,
    root: &Path,
    posargs: &[&str],
) -> Session<'a> {
    Session::new(name, config, runner, vcs)
        .with_root(root)
        .with_posargs(posargs.iter().map(ToString::to_string).collect())
}
