//! Session scheduling options
//!
//! Every option a session definition can carry gets a concrete field here.

use serde::{Deserialize, Serialize};

/// How a session's isolated environment is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// `python -m venv`
    #[default]
    Venv,
    /// `virtualenv`
    Virtualenv,
    /// `uv venv`
    Uv,
    /// No environment, tools run from the caller's `PATH`
    None,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Venv => write!(f, "venv"),
            Self::Virtualenv => write!(f, "virtualenv"),
            Self::Uv => write!(f, "uv"),
            Self::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "venv" => Ok(Self::Venv),
            "virtualenv" => Ok(Self::Virtualenv),
            "uv" => Ok(Self::Uv),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid backend: {s}. Use: venv, virtualenv, uv, none")),
        }
    }
}

/// Interpreter selection for a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PythonSpec {
    /// Whatever `python` resolves to
    #[default]
    Default,
    /// A single pinned version
    Version(String),
    /// One registered session per version
    Versions(Vec<String>),
    /// Run without an environment
    Disabled,
}

impl PythonSpec {
    /// Versions to register the session for; `None` means unpinned
    #[must_use]
    pub fn expand(&self) -> Vec<Option<String>> {
        match self {
            Self::Default | Self::Disabled => vec![None],
            Self::Version(version) => vec![Some(version.clone())],
            Self::Versions(versions) => versions.iter().cloned().map(Some).collect(),
        }
    }
}

/// Scheduling hints for a session definition
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionOptions {
    /// Interpreter selection
    pub python: PythonSpec,
    /// Reuse an existing environment instead of recreating it
    pub reuse_venv: Option<bool>,
    /// Environment backend
    pub venv_backend: Backend,
    /// Tags for `--tags` selection
    pub tags: Vec<String>,
}

impl SessionOptions {
    /// Set the interpreter selection
    #[must_use]
    pub fn python(mut self, python: PythonSpec) -> Self {
        self.python = python;
        self
    }

    /// Set environment reuse
    #[must_use]
    pub const fn reuse_venv(mut self, reuse: bool) -> Self {
        self.reuse_venv = Some(reuse);
        self
    }

    /// Set the environment backend
    #[must_use]
    pub const fn venv_backend(mut self, backend: Backend) -> Self {
        self.venv_backend = backend;
        self
    }

    /// Set tags
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Backend actually used, accounting for `PythonSpec::Disabled`
    #[must_use]
    pub fn effective_backend(&self) -> Backend {
        if self.python == PythonSpec::Disabled {
            Backend::None
        } else {
            self.venv_backend
        }
    }
}
