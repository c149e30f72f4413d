//! `type-check` and `verify-types` - pyright

use crate::core::services::{Session, install_deps};

/// Type-check the project and its tests
pub fn type_check(session: &Session<'_>) -> anyhow::Result<()> {
    let requirements = session.requirements();
    install_deps(
        session,
        &requirements.with_project(&["nox", "tests", "type-checking"], true),
        true,
    )?;
    run_pyright(session, &[])
}

/// Check the type completeness of the package's public API
pub fn verify_types(session: &Session<'_>) -> anyhow::Result<()> {
    let project_name = session.config().assert_project_name()?;
    install_deps(session, &session.requirements().with_project(&["type-checking"], true), true)?;
    run_pyright(session, &["--verifytypes", project_name, "--ignoreexternal"])
}

fn run_pyright(session: &Session<'_>, args: &[&str]) -> anyhow::Result<()> {
    session.run("python", ["-m", "pyright", "--version"])?;
    session.run("python", ["-m", "pyright"].iter().chain(args).copied())
}
