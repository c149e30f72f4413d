//! Isolated environment provisioning
//!
//! Each session gets its own Python environment under `.piped/<session>`.
//! Reusable environments are kept when they look intact (`pyvenv.cfg`
//! present); anything else is wiped and recreated by the session's backend.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::core::models::{Backend, Invocation};
use crate::core::ports::CommandRunner;
use crate::core::services::registry::RegisteredSession;
use crate::paths;

/// Marker file written by every supported backend
const PYVENV_CFG: &str = "pyvenv.cfg";

/// Command-line overrides for environment handling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvironmentPolicy {
    /// Reuse existing environments for every session
    pub reuse_existing: bool,
    /// Run every session without an environment
    pub no_venv: bool,
}

/// Backend a session ends up with under `policy`
#[must_use]
pub fn backend_for(session: &RegisteredSession, policy: EnvironmentPolicy) -> Backend {
    if policy.no_venv {
        Backend::None
    } else {
        session.options.effective_backend()
    }
}

/// Command creating an environment at `dir`
#[must_use]
pub fn creation_command(backend: Backend, python: Option<&str>, dir: &Path) -> Option<Invocation> {
    let target = dir.display().to_string();
    let invocation = match backend {
        Backend::Venv => {
            let interpreter = python.map_or_else(|| "python".to_string(), |version| format!("python{version}"));
            Invocation::new(interpreter).args(["-m", "venv", target.as_str()])
        },
        Backend::Virtualenv => {
            let invocation = Invocation::new("virtualenv").arg(target);
            match python {
                Some(version) => invocation.args(["-p".to_string(), format!("python{version}")]),
                None => invocation,
            }
        },
        Backend::Uv => {
            let invocation = Invocation::new("uv").args(["venv", target.as_str()]);
            match python {
                Some(version) => invocation.args(["--python", version]),
                None => invocation,
            }
        },
        Backend::None => return None,
    };
    Some(invocation)
}

/// Create or reuse the environment for a session
///
/// Returns the environment directory, or `None` for sessions that run
/// without one.
///
/// # Errors
///
/// Fails when a stale environment cannot be removed or the backend command
/// fails.
pub fn provision(
    runner: &dyn CommandRunner,
    root: &Path,
    session: &RegisteredSession,
    policy: EnvironmentPolicy,
) -> anyhow::Result<Option<PathBuf>> {
    let backend = backend_for(session, policy);
    let dir = paths::session_env_dir(root, &session.name);
    let Some(invocation) = creation_command(backend, session.python.as_deref(), &dir) else {
        return Ok(None);
    };

    let reuse = policy.reuse_existing || session.options.reuse_venv.unwrap_or(false);
    if reuse && dir.join(PYVENV_CFG).exists() {
        log::info!("{}: re-using existing environment at {}", session.name, dir.display());
        return Ok(Some(dir));
    }

    if dir.exists() {
        fs::remove_dir_all(&dir).with_context(|| format!("failed to remove stale environment {}", dir.display()))?;
    }

    log::info!("{}: creating {backend} environment at {}", session.name, dir.display());
    let invocation = invocation.current_dir(root);
    runner.run(&invocation)?.check(&invocation)?;
    Ok(Some(dir))
}
