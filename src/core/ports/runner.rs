//! Subprocess port
//!
//! Defines the interface for running external tools.

use crate::core::models::Invocation;
use crate::error::PipedError;

/// Outcome of a finished invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// Captured stdout (silent invocations only)
    pub stdout: String,
}

impl RunOutput {
    /// A successful run with no captured output
    #[must_use]
    pub const fn success() -> Self {
        Self {
            code: Some(0),
            stdout: String::new(),
        }
    }

    /// Check the exit code against the invocation's accepted codes
    ///
    /// # Errors
    ///
    /// Returns [`PipedError::CommandFailed`] for a rejected code and
    /// [`PipedError::CommandKilled`] when there is no code at all.
    pub fn check(self, invocation: &Invocation) -> Result<Self, PipedError> {
        match self.code {
            Some(code) if invocation.accepts(code) => Ok(self),
            Some(code) => Err(PipedError::CommandFailed {
                program: invocation.program.clone(),
                code,
            }),
            None => Err(PipedError::CommandKilled {
                program: invocation.program.clone(),
            }),
        }
    }
}

/// Runs external programs
///
/// Implementations block until the child exits. They report the exit code
/// and leave the success decision to the caller.
pub trait CommandRunner: std::fmt::Debug {
    /// Run an invocation to completion
    fn run(&self, invocation: &Invocation) -> anyhow::Result<RunOutput>;
}
