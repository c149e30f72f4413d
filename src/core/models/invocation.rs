//! Subprocess invocations
//!
//! Every external tool is described by an explicit argument vector. Nothing
//! is ever passed through a shell.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A fully materialised subprocess call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute, resolved through `PATH`
    pub program: String,
    /// Arguments, passed verbatim
    pub args: Vec<String>,
    /// Variables set on top of the inherited environment
    pub env: BTreeMap<String, String>,
    /// Working directory
    pub cwd: Option<PathBuf>,
    /// Exit codes treated as success
    pub success_codes: Vec<i32>,
    /// Capture stdout instead of passing it through
    pub silent: bool,
    /// Echo the command line before running
    pub log: bool,
}

impl Invocation {
    /// A logged invocation that only accepts exit code 0
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
            success_codes: vec![0],
            silent: false,
            log: true,
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Replace the environment overrides
    #[must_use]
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Accept these exit codes as success
    #[must_use]
    pub fn success_codes(mut self, codes: &[i32]) -> Self {
        self.success_codes = codes.to_vec();
        self
    }

    /// Capture stdout and do not echo the command
    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.silent = true;
        self.log = false;
        self
    }

    /// Do not echo the command
    #[must_use]
    pub const fn quiet(mut self) -> Self {
        self.log = false;
        self
    }

    /// Whether `code` counts as success
    #[must_use]
    pub fn accepts(&self, code: i32) -> bool {
        self.success_codes.contains(&code)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}
