//! `test` and `test-coverage` - pytest

use crate::core::services::{Session, install_deps};

/// Run the test suite in parallel with pytest-xdist
pub fn test(session: &Session<'_>) -> anyhow::Result<()> {
    install_deps(session, &session.requirements().with_project(&["tests"], true), true)?;
    // TODO: read the import mode from [tool.piped] once projects need something other than importlib
    session.run("pytest", ["-n", "auto", "--import-mode", "importlib"])
}

/// Run the test suite while recording coverage for the project package
pub fn test_coverage(session: &Session<'_>) -> anyhow::Result<()> {
    let project_name = session.config().assert_project_name()?;
    install_deps(session, &session.requirements().with_project(&["tests"], true), true)?;
    session.run(
        "pytest",
        [
            "-n".to_string(),
            "auto".to_string(),
            format!("--cov={project_name}"),
            "--cov-report".to_string(),
            "html:coverage_html".to_string(),
            "--cov-report".to_string(),
            "xml:coverage.xml".to_string(),
        ],
    )
}
