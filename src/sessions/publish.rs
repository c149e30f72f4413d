//! `build`, `publish` and `test-publish` - flit packaging

use std::collections::BTreeMap;

use crate::core::models::Invocation;
use crate::core::services::{Session, install_deps};

/// Upload endpoint used by `test-publish`
pub const TEST_PYPI: &str = "https://test.pypi.org/legacy/";

/// Username flit authenticates with when none is set
const TOKEN_USERNAME: &str = "__token__";

/// Build sdist and wheel with flit
pub fn build(session: &Session<'_>) -> anyhow::Result<()> {
    install_deps(session, &session.requirements().args(&["publish"], false), true)?;
    session.log("Starting build");
    session.run("flit", ["build"])
}

/// Publish to PyPI (or `PYPI_TARGET`)
pub fn publish(session: &Session<'_>) -> anyhow::Result<()> {
    publish_with(session, session.env().clone())
}

/// Publish to test PyPI unless `PYPI_TARGET` says otherwise
pub fn test_publish(session: &Session<'_>) -> anyhow::Result<()> {
    let mut env = session.env().clone();
    env.entry("PYPI_TARGET".to_string()).or_insert_with(|| TEST_PYPI.to_string());
    publish_with(session, env)
}

fn publish_with(session: &Session<'_>, env: BTreeMap<String, String>) -> anyhow::Result<()> {
    let requirements = session.requirements();
    install_deps(session, &requirements.args(&["publish"], false), true)?;
    install_deps(session, &requirements.with_project(&[], true), false)?;

    session.run_invocation(Invocation::new("flit").arg("publish").with_env(flit_env(env)))?;
    Ok(())
}

/// Map the `PYPI_*` variables onto the ones flit reads
#[must_use]
pub fn flit_env(mut env: BTreeMap<String, String>) -> BTreeMap<String, String> {
    if let Some(target) = env.get("PYPI_TARGET").cloned() {
        env.insert("FLIT_INDEX_URL".to_string(), target);
    }

    if let Some(token) = env.get("PYPI_TOKEN").cloned() {
        env.insert("FLIT_PASSWORD".to_string(), token);
    }

    env.entry("FLIT_USERNAME".to_string())
        .or_insert_with(|| TOKEN_USERNAME.to_string());
    env
}
