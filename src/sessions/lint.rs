//! Linting sessions: `flake8`, `slot-check`, `spell-check`, `verify-markup`

use crate::core::models::Invocation;
use crate::core::services::{Session, install_deps, tracked_files};

/// Words codespell must not flag
pub const SPELLING_IGNORE: &str = "TimeSchedule|Nd";

/// Exit codes accepted from the pre-commit markup checkers
const MARKUP_SUCCESS: [i32; 2] = [0, 1];

/// Run flake8 (through pflake8, which reads `pyproject.toml`) over the targets
pub fn flake8(session: &Session<'_>) -> anyhow::Result<()> {
    install_deps(session, &session.requirements().args(&["flake8"], false), true)?;
    session.log("Running flake8");
    session.run_invocation(Invocation::new("pflake8").args(&session.config().top_level_targets).quiet())?;
    Ok(())
}

/// Check slotted classes with slotscheck
pub fn slot_check(session: &Session<'_>) -> anyhow::Result<()> {
    let project_name = session.config().assert_project_name()?;
    install_deps(session, &session.requirements().with_project(&["lint"], true), true)?;
    session.run("slotscheck", ["-m", project_name])
}

/// Spell-check every tracked, non-vendored file
pub fn spell_check(session: &Session<'_>) -> anyhow::Result<()> {
    install_deps(session, &session.requirements().args(&["lint"], false), true)?;
    session.log("Running codespell");
    let files = tracked_files(session, true)?;
    let invocation = Invocation::new("codespell")
        .args(files)
        .args(["--ignore-regex", SPELLING_IGNORE])
        .quiet();
    session.run_invocation(invocation)?;
    Ok(())
}

/// Check the syntax of tracked TOML and YAML files
pub fn verify_markup(session: &Session<'_>) -> anyhow::Result<()> {
    install_deps(session, &session.requirements().with_project(&["lint"], true), true)?;
    let tracked = tracked_files(session, false)?;

    session.log("Running pre_commit_hooks.check_toml");
    let toml_files = tracked.iter().filter(|path| path.ends_with(".toml"));
    session.run_invocation(pre_commit_hook("check_toml").args(toml_files.cloned()))?;

    session.log("Running pre_commit_hooks.check_yaml");
    let yaml_files = tracked
        .iter()
        .filter(|path| path.ends_with(".yml") || path.ends_with(".yaml"));
    session.run_invocation(pre_commit_hook("check_yaml").args(yaml_files.cloned()))?;
    Ok(())
}

/// `python -m pre_commit_hooks.<hook>`, tolerating exit code 1
pub(crate) fn pre_commit_hook(hook: &str) -> Invocation {
    Invocation::new("python")
        .args(["-m".to_string(), format!("pre_commit_hooks.{hook}")])
        .success_codes(&MARKUP_SUCCESS)
        .quiet()
}
