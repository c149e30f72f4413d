//! Subprocess adapters
//!
//! Implements `CommandRunner` on top of `std::process::Command`. Output of
//! non-silent invocations goes straight to the caller's terminal.

use std::process::{Command, Stdio};

use crate::core::models::Invocation;
use crate::core::ports::{CommandRunner, RunOutput};
use crate::error::PipedError;

/// Runs invocations as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).envs(&invocation.env);
        if let Some(dir) = &invocation.cwd {
            command.current_dir(dir);
        }
        command
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> anyhow::Result<RunOutput> {
        let spawn_error = |source| PipedError::Spawn {
            program: invocation.program.clone(),
            source,
        };

        if invocation.silent {
            let output = Self::command(invocation)
                .stdin(Stdio::null())
                .stderr(Stdio::inherit())
                .output()
                .map_err(spawn_error)?;
            return Ok(RunOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            });
        }

        let status = Self::command(invocation).status().map_err(spawn_error)?;
        Ok(RunOutput {
            code: status.code(),
            stdout: String::new(),
        })
    }
}

/// Prints invocations instead of running them
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&self, invocation: &Invocation) -> anyhow::Result<RunOutput> {
        println!("would run: {invocation}");
        Ok(RunOutput::success())
    }
}
