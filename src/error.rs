//! Error taxonomy for piped
//!
//! Configuration errors are fatal and abort before any session runs.
//! Command errors abort the current session and decide the process exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by piped
#[derive(Debug, Error)]
pub enum PipedError {
    /// Manifest could not be read
    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        /// Manifest path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Manifest is not valid TOML
    #[error("failed to parse manifest {path}: {source}")]
    ManifestParse {
        /// Manifest path
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// Manifest has no `[tool.piped]` table
    #[error("manifest {path} has no [tool.{section}] table")]
    MissingSection {
        /// Manifest path
        path: PathBuf,
        /// Expected table name under `tool`
        section: &'static str,
    },

    /// `[tool.piped]` does not describe a valid configuration
    #[error("invalid [tool.piped] configuration: {0}")]
    InvalidConfig(#[source] toml::de::Error),

    /// `[project]` does not describe valid dependency metadata
    #[error("invalid [project] table: {0}")]
    InvalidProject(#[source] toml::de::Error),

    /// A session needs `project_name` and none is configured
    #[error("This CI cannot run without project_name")]
    MissingProjectName,

    /// A program could not be started
    #[error("failed to launch {program}: {source}")]
    Spawn {
        /// Program name
        program: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A program exited with a code it was not allowed to
    #[error("{program} exited with status {code}")]
    CommandFailed {
        /// Program name
        program: String,
        /// Exit code
        code: i32,
    },

    /// A program was terminated by a signal
    #[error("{program} was terminated by a signal")]
    CommandKilled {
        /// Program name
        program: String,
    },

    /// Requested sessions are not registered
    #[error("sessions not found: {}", .0.join(", "))]
    UnknownSessions(Vec<String>),

    /// Two sessions resolved to the same name
    #[error("session {0} is already registered")]
    DuplicateSession(String),
}

impl PipedError {
    /// Process exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Exit code for an arbitrary session error
///
/// Subprocess failures keep their own code, anything else maps to 1.
#[must_use]
pub fn exit_code_of(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PipedError>().map_or(1, PipedError::exit_code)
}
