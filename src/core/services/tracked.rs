//! Tracked file enumeration

use crate::core::services::session::Session;

/// Paths tracked by version control, in index order
///
/// With `ignore_vendor`, paths matching the configured `path_ignore` are
/// dropped. The repository is queried again on every call.
pub fn tracked_files(session: &Session<'_>, ignore_vendor: bool) -> anyhow::Result<Vec<String>> {
    let files = session.vcs().tracked_files()?;
    let config = session.config();

    if !ignore_vendor || config.path_ignore.is_none() {
        return Ok(files);
    }

    let before = files.len();
    let kept: Vec<String> = files.into_iter().filter(|path| !config.is_ignored(path)).collect();
    log::debug!("{}: ignoring {} vendored path(s)", session.name(), before - kept.len());
    Ok(kept)
}
