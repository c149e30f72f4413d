//! List the sessions a project exposes

use std::path::Path;

use piped::Config;
use piped::core::services::Registry;
use piped::core::services::environment::{EnvironmentPolicy, backend_for};
use piped::output::{OutputMode, SessionInfo, SessionListResult};
use piped::sessions;

/// Print every registered (non-hidden) session
pub fn list(manifest: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let config = Config::load(manifest)?;
    let mut registry = Registry::new();
    sessions::register_all(&mut registry, &config)?;

    let sessions = registry
        .sessions()
        .iter()
        .map(|session| SessionInfo {
            name: session.name.clone(),
            description: session.description.clone(),
            default: config
                .default_sessions
                .iter()
                .any(|name| *name == session.name || *name == session.family),
            backend: backend_for(session, EnvironmentPolicy::default()),
            tags: session.options.tags.clone(),
        })
        .collect();

    SessionListResult {
        manifest: manifest.display().to_string(),
        sessions,
    }
    .render(mode);
    Ok(())
}
