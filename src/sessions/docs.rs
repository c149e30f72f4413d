//! `generate-docs` - build the documentation site with mkdocs

use std::fs;

use anyhow::Context;

use crate::core::services::{Session, install_deps};

/// Output directory when `-o`/`--output` is not given
pub const DEFAULT_OUTPUT: &str = "./site";

/// Files copied next to the generated site
const EXTRA_FILES: [&str; 2] = ["CHANGELOG.md", "README.md"];

/// Build the docs into `-o <dir>` (default `./site`)
pub fn generate_docs(session: &Session<'_>) -> anyhow::Result<()> {
    install_deps(session, &session.requirements().args(&["docs"], false), true)?;
    let output = session
        .find_option(&["-o", "--output"], None)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    session.run("mkdocs", ["build", "-d", output.as_str()])?;

    let output_dir = session.path(&output);
    for file in EXTRA_FILES {
        let target = output_dir.join(file);
        fs::copy(session.path(file), &target)
            .with_context(|| format!("failed to copy {file} to {}", target.display()))?;
    }
    Ok(())
}
