//! Dependency installation
//!
//! Sessions install their requirements into their own environment. Passing
//! `--skip-install` after `--` runs against an already prepared environment,
//! though a self-install with extras (`.[extras]`) still force-reinstalls the
//! local project so it matches the checkout.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::services::session::Session;

/// Positional flag that skips dependency installation
pub const SKIP_INSTALL: &str = "--skip-install";

static SELF_INSTALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.\[.+\]$").expect("self-install pattern is valid"));

/// Whether the session was asked to skip installation
#[must_use]
pub fn skip_install_requested(session: &Session<'_>) -> bool {
    session
        .find_option(&[SKIP_INSTALL], Some("True"))
        .is_some_and(|value| !value.is_empty())
}

/// Whether a requirement is the local project with extras
#[must_use]
pub fn is_self_install(requirement: &str) -> bool {
    SELF_INSTALL.is_match(requirement)
}

/// Install requirements into the session environment
///
/// `first_call` upgrades `wheel` before anything else; sessions that install
/// in several steps pass `false` for the later ones.
pub fn install_deps(session: &Session<'_>, requirements: &[String], first_call: bool) -> anyhow::Result<()> {
    if !skip_install_requested(session) {
        if first_call {
            session.install(["--upgrade", "wheel"])?;
        }

        let args = std::iter::once("--upgrade".to_string()).chain(requirements.iter().cloned());
        return session.install(args);
    }

    if requirements.iter().any(|requirement| is_self_install(requirement)) {
        session.install(["--upgrade", "--force-reinstall", "--no-dependencies", "."])?;
    } else {
        log::debug!("{}: skipping dependency installation", session.name());
    }
    Ok(())
}
