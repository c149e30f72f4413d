//! Tests for dependency installation and requirement resolution

use piped::core::services::{DevRequirements, install_deps, skip_install_requested};

use crate::common::{FakeVcs, RecordingRunner, TestProject, sample_config, session};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

// =============================================================================
// INSTALL
// =============================================================================

#[test]
fn test_first_call_upgrades_wheel_first() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("test", &config, &runner, &vcs, project.path(), &[]);

    install_deps(&session, &strings(&[".", "-r", "dev-requirements/tests.txt"]), true).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec![
            "python -m pip install --upgrade wheel",
            "python -m pip install --upgrade . -r dev-requirements/tests.txt",
        ]
    );
}

#[test]
fn test_later_calls_skip_wheel_upgrade() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("publish", &config, &runner, &vcs, project.path(), &[]);

    install_deps(&session, &strings(&["."]), false).unwrap();

    assert_eq!(runner.command_lines(), vec!["python -m pip install --upgrade ."]);
}

#[test]
fn test_skip_install_still_reinstalls_project_with_extras() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("test", &config, &runner, &vcs, project.path(), &["--skip-install"]);

    install_deps(&session, &strings(&[".[extras]", "-r", "dev-requirements/tests.txt"]), true).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec!["python -m pip install --upgrade --force-reinstall --no-dependencies ."]
    );
}

#[test]
fn test_skip_install_without_extras_installs_nothing() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("test", &config, &runner, &vcs, project.path(), &["--skip-install"]);

    install_deps(&session, &strings(&[".", "-r", "dev-requirements/tests.txt"]), true).unwrap();

    assert!(runner.calls().is_empty());
}

#[test]
fn test_skip_install_detection() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());

    assert!(skip_install_requested(&session("a", &config, &runner, &vcs, project.path(), &["--skip-install"])));
    assert!(skip_install_requested(&session("b", &config, &runner, &vcs, project.path(), &["--skip-install", "1"])));
    assert!(!skip_install_requested(&session("c", &config, &runner, &vcs, project.path(), &["-o", "site"])));
    assert!(!skip_install_requested(&session("d", &config, &runner, &vcs, project.path(), &[])));
}

#[test]
fn test_failed_install_propagates() {
    let project = TestProject::new();
    let (config, vcs) = (sample_config(), FakeVcs::default());
    let runner = RecordingRunner::new().exiting("python", 2);
    let session = session("test", &config, &runner, &vcs, project.path(), &[]);

    let err = install_deps(&session, &strings(&["."]), true).unwrap_err();

    assert_eq!(piped::error::exit_code_of(&err), 2);
    assert_eq!(runner.calls().len(), 1);
}

// =============================================================================
// REQUIREMENT FILES
// =============================================================================

#[test]
fn test_local_requirement_files_are_relative() {
    let project = TestProject::new();
    project.add_file("dev-requirements/tests.txt", "pytest\n");

    let requirements = DevRequirements::new(project.path());
    assert_eq!(requirements.args(&["tests"], false), vec!["-r", "dev-requirements/tests.txt"]);
}

#[test]
fn test_missing_local_file_falls_back_to_shared() {
    let project = TestProject::new();
    let shared = TestProject::new();
    shared.add_file("lint.txt", "codespell\n");

    let requirements = DevRequirements::new(project.path()).with_shared(Some(shared.path().to_path_buf()));
    let expected = shared.path().join("lint.txt").display().to_string();
    assert_eq!(requirements.args(&["lint"], false), vec!["-r".to_string(), expected]);
}

#[test]
fn test_constraints_prefix_only_when_present() {
    let project = TestProject::new();
    project.add_file("dev-requirements/tests.txt", "pytest\n");

    let requirements = DevRequirements::new(project.path());
    assert_eq!(requirements.with_project(&["tests"], true), vec![".", "-r", "dev-requirements/tests.txt"]);

    project.add_file("dev-requirements/constraints.txt", "alluka==0.1.2\n");
    assert_eq!(
        requirements.with_project(&["tests"], true),
        vec![".", "-c", "dev-requirements/constraints.txt", "-r", "dev-requirements/tests.txt"]
    );
    assert_eq!(requirements.args(&["tests"], false), vec!["-r", "dev-requirements/tests.txt"]);
}
