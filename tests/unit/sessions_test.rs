//! Tests for the session catalog, run against recording fakes

use std::collections::BTreeMap;

use piped::PipedError;
use piped::sessions::publish::{TEST_PYPI, flit_env};
use piped::sessions::{cleanup, deps, docs, lint, publish, reformat, testing, typing};

use crate::common::{FakeVcs, MANIFEST, RecordingRunner, TestProject, config, sample_config, session};

fn programs(runner: &RecordingRunner) -> Vec<String> {
    runner.calls().into_iter().map(|invocation| invocation.program).collect()
}

// =============================================================================
// CLEANUP
// =============================================================================

#[test]
fn test_cleanup_removes_artifacts() {
    let project = TestProject::new();
    project.add_dir("dist");
    project.add_file("site/index.html", "<html></html>");
    project.add_dir(".piped/test/bin");
    project.add_file(".coverage", "");
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("cleanup", &config, &runner, &vcs, project.path(), &[]);

    cleanup::cleanup(&session).unwrap();

    assert!(!project.exists("dist"));
    assert!(!project.exists("site"));
    assert!(!project.exists(".piped"));
    assert!(!project.exists(".coverage"));
    assert!(project.exists("pyproject.toml"));
    assert!(runner.calls().is_empty());
}

#[test]
fn test_cleanup_tolerates_missing_paths() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("cleanup", &config, &runner, &vcs, project.path(), &[]);

    assert!(cleanup::cleanup(&session).is_ok());
}

// =============================================================================
// DEPENDENCIES
// =============================================================================

#[test]
fn test_freeze_dev_deps_regenerates_constraints() {
    let project = TestProject::new();
    project.add_file("dev-requirements/tests.in", "pytest\n");
    project.add_file("dev-requirements/tests.txt", "pytest==8.0.0\n");
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("freeze-dev-deps", &config, &runner, &vcs, project.path(), &[]);

    deps::freeze_dev_deps(&session).unwrap();

    let constraints = std::fs::read_to_string(project.path().join("dev-requirements/constraints.in")).unwrap();
    assert_eq!(constraints, "alluka>=0.1.2\n");
    assert!(!project.exists("dev-requirements/tests.txt"));
    assert_eq!(
        runner.command_lines()[2..],
        [
            "pip-compile-cross-platform -o dev-requirements/constraints.txt --min-python-version 3.9,<3.12 dev-requirements/constraints.in",
            "pip-compile-cross-platform -o dev-requirements/tests.txt --min-python-version 3.9,<3.12 dev-requirements/tests.in",
        ]
    );
}

#[test]
fn test_freeze_dev_deps_with_selection_leaves_constraints_alone() {
    let project = TestProject::new();
    project.add_file("dev-requirements/docs.in", "mkdocs\n");
    project.add_file("dev-requirements/tests.in", "pytest\n");
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session(
        "freeze-dev-deps",
        &config,
        &runner,
        &vcs,
        project.path(),
        &["dev-requirements/tests.in"],
    );

    deps::freeze_dev_deps(&session).unwrap();

    assert!(!project.exists("dev-requirements/constraints.in"));
    let compiles = runner.calls_to("pip-compile-cross-platform");
    assert_eq!(compiles.len(), 1);
    assert_eq!(compiles[0].args.last().map(String::as_str), Some("dev-requirements/tests.in"));
}

#[test]
fn test_freeze_dev_deps_without_dependencies_removes_constraints() {
    let project = TestProject::new();
    project.add_file("pyproject.toml", &MANIFEST.replace("dependencies = [\"alluka>=0.1.2\"]", ""));
    project.add_file("dev-requirements/constraints.in", "old\n");
    project.add_file("dev-requirements/constraints.txt", "old==1\n");
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("freeze-dev-deps", &config, &runner, &vcs, project.path(), &[]);

    deps::freeze_dev_deps(&session).unwrap();

    assert!(!project.exists("dev-requirements/constraints.in"));
    assert!(!project.exists("dev-requirements/constraints.txt"));
    assert!(runner.calls_to("pip-compile-cross-platform").is_empty());
}

#[test]
fn test_verify_dev_deps_dry_runs_each_file() {
    let project = TestProject::new();
    project.add_file("dev-requirements/lint.txt", "codespell==2\n");
    project.add_file("dev-requirements/tests.txt", "pytest==8\n");
    project.add_file("dev-requirements/tests.in", "pytest\n");
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("verify-dev-deps", &config, &runner, &vcs, project.path(), &[]);

    deps::verify_dev_deps(&session).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec![
            "python -m pip install --dry-run -r dev-requirements/lint.txt",
            "python -m pip install --dry-run -r dev-requirements/tests.txt",
        ]
    );
}

// =============================================================================
// DOCS
// =============================================================================

#[test]
fn test_generate_docs_honours_output_flag() {
    let project = TestProject::new();
    project.add_file("CHANGELOG.md", "# Changelog\n");
    project.add_file("README.md", "# yuyo\n");
    project.add_dir("public");
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("generate-docs", &config, &runner, &vcs, project.path(), &["-o", "public"]);

    docs::generate_docs(&session).unwrap();

    assert_eq!(runner.command_lines().last().unwrap(), "mkdocs build -d public");
    assert!(project.exists("public/CHANGELOG.md"));
    assert!(project.exists("public/README.md"));
}

#[test]
fn test_generate_docs_defaults_to_site() {
    let project = TestProject::new();
    project.add_file("CHANGELOG.md", "");
    project.add_file("README.md", "");
    project.add_dir("site");
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("generate-docs", &config, &runner, &vcs, project.path(), &[]);

    docs::generate_docs(&session).unwrap();

    assert_eq!(runner.command_lines().last().unwrap(), "mkdocs build -d ./site");
    assert!(project.exists("site/README.md"));
}

#[test]
fn test_generate_docs_fails_when_build_fails() {
    let project = TestProject::new();
    let (config, vcs) = (sample_config(), FakeVcs::default());
    let runner = RecordingRunner::new().exiting("mkdocs", 1);
    let session = session("generate-docs", &config, &runner, &vcs, project.path(), &[]);

    assert!(docs::generate_docs(&session).is_err());
}

// =============================================================================
// LINT
// =============================================================================

#[test]
fn test_flake8_runs_over_targets() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("flake8", &config, &runner, &vcs, project.path(), &[]);

    lint::flake8(&session).unwrap();

    assert_eq!(runner.command_lines().last().unwrap(), "pflake8 ./tests ./yuyo");
}

#[test]
fn test_slot_check_requires_project_name() {
    let project = TestProject::new();
    let config = config(&MANIFEST.replace("project_name = \"yuyo\"\n", ""));
    let (runner, vcs) = (RecordingRunner::new(), FakeVcs::default());
    let session = session("slot-check", &config, &runner, &vcs, project.path(), &[]);

    let err = lint::slot_check(&session).unwrap_err();

    assert!(matches!(err.downcast_ref::<PipedError>(), Some(PipedError::MissingProjectName)));
    assert!(runner.calls().is_empty());
}

#[test]
fn test_slot_check_targets_project_module() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("slot-check", &config, &runner, &vcs, project.path(), &[]);

    lint::slot_check(&session).unwrap();

    assert_eq!(runner.command_lines().last().unwrap(), "slotscheck -m yuyo");
}

#[test]
fn test_spell_check_skips_vendored_files() {
    let project = TestProject::new();
    let config = sample_config();
    let (runner, vcs) = (RecordingRunner::new(), FakeVcs::new(&["README.md", "vendor/x.py", "yuyo/a.py"]));
    let session = session("spell-check", &config, &runner, &vcs, project.path(), &[]);

    lint::spell_check(&session).unwrap();

    let codespell = runner.calls_to("codespell");
    assert_eq!(codespell.len(), 1);
    assert_eq!(
        codespell[0].args,
        vec!["README.md", "yuyo/a.py", "--ignore-regex", lint::SPELLING_IGNORE]
    );
    assert!(!codespell[0].log);
}

#[test]
fn test_verify_markup_filters_and_tolerates_exit_one() {
    let project = TestProject::new();
    let config = sample_config();
    let vcs = FakeVcs::new(&["pyproject.toml", "ci.yml", "mkdocs.yaml", "yuyo/a.py", "vendor/x.toml"]);
    let runner = RecordingRunner::new().exiting("python", 1);
    let session = session("verify-markup", &config, &runner, &vcs, project.path(), &["--skip-install"]);

    lint::verify_markup(&session).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec![
            "python -m pre_commit_hooks.check_toml pyproject.toml vendor/x.toml",
            "python -m pre_commit_hooks.check_yaml ci.yml mkdocs.yaml",
        ]
    );
}

#[test]
fn test_verify_markup_fails_on_other_codes() {
    let project = TestProject::new();
    let config = sample_config();
    let vcs = FakeVcs::new(&["pyproject.toml"]);
    let runner = RecordingRunner::new().exiting("python", 2);
    let session = session("verify-markup", &config, &runner, &vcs, project.path(), &["--skip-install"]);

    let err = lint::verify_markup(&session).unwrap_err();
    assert_eq!(piped::error::exit_code_of(&err), 2);
}

// =============================================================================
// PUBLISH
// =============================================================================

#[test]
fn test_flit_env_maps_pypi_variables() {
    let env = BTreeMap::from([
        ("PYPI_TARGET".to_string(), "https://example.org/".to_string()),
        ("PYPI_TOKEN".to_string(), "secret".to_string()),
    ]);

    let env = flit_env(env);

    assert_eq!(env["FLIT_INDEX_URL"], "https://example.org/");
    assert_eq!(env["FLIT_PASSWORD"], "secret");
    assert_eq!(env["FLIT_USERNAME"], "__token__");
}

#[test]
fn test_flit_env_keeps_explicit_username() {
    let env = flit_env(BTreeMap::from([("FLIT_USERNAME".to_string(), "me".to_string())]));

    assert_eq!(env["FLIT_USERNAME"], "me");
    assert!(!env.contains_key("FLIT_INDEX_URL"));
    assert!(!env.contains_key("FLIT_PASSWORD"));
}

#[test]
fn test_build_runs_flit() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("build", &config, &runner, &vcs, project.path(), &[]);

    publish::build(&session).unwrap();

    assert_eq!(runner.command_lines().last().unwrap(), "flit build");
}

#[test]
fn test_publish_installs_then_uploads() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("publish", &config, &runner, &vcs, project.path(), &[]);

    publish::publish(&session).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec![
            "python -m pip install --upgrade wheel",
            "python -m pip install --upgrade -r dev-requirements/publish.txt",
            "python -m pip install --upgrade .",
            "flit publish",
        ]
    );
    let flit = &runner.calls_to("flit")[0];
    assert_eq!(flit.env["FLIT_USERNAME"], "__token__");
    assert!(!flit.env.contains_key("FLIT_INDEX_URL"));
}

#[test]
fn test_test_publish_defaults_to_test_index() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("test-publish", &config, &runner, &vcs, project.path(), &[]);

    publish::test_publish(&session).unwrap();

    assert_eq!(runner.calls_to("flit")[0].env["FLIT_INDEX_URL"], TEST_PYPI);
}

#[test]
fn test_test_publish_respects_explicit_target() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let env = BTreeMap::from([("PYPI_TARGET".to_string(), "https://mirror.example/".to_string())]);
    let session = session("test-publish", &config, &runner, &vcs, project.path(), &[]).with_env(env);

    publish::test_publish(&session).unwrap();

    assert_eq!(runner.calls_to("flit")[0].env["FLIT_INDEX_URL"], "https://mirror.example/");
}

// =============================================================================
// REFORMAT
// =============================================================================

#[test]
fn test_reformat_runs_formatters_in_order() {
    let project = TestProject::new();
    let config = sample_config();
    let vcs = FakeVcs::new(&["README.md", "vendor/x.py", "yuyo/a.py", "yuyo/a.pyi"]);
    let runner = RecordingRunner::new();
    let session = session("reformat", &config, &runner, &vcs, project.path(), &["--skip-install"]);

    reformat::reformat(&session).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec![
            "black ./tests ./yuyo",
            "isort ./tests ./yuyo",
            "pycln ./tests ./yuyo",
            "sort-all yuyo/a.py yuyo/a.pyi",
            "python -m pre_commit_hooks.end_of_file_fixer README.md yuyo/a.py yuyo/a.pyi",
            "python -m pre_commit_hooks.trailing_whitespace_fixer README.md yuyo/a.py yuyo/a.pyi",
        ]
    );
}

#[test]
fn test_reformat_tolerates_sort_all_changes() {
    let project = TestProject::new();
    let config = sample_config();
    let vcs = FakeVcs::new(&["yuyo/a.py"]);
    let runner = RecordingRunner::new().exiting("sort-all", 1);
    let session = session("reformat", &config, &runner, &vcs, project.path(), &["--skip-install"]);

    assert!(reformat::reformat(&session).is_ok());
}

#[test]
fn test_reformat_stops_on_formatter_failure() {
    let project = TestProject::new();
    let config = sample_config();
    let vcs = FakeVcs::default();
    let runner = RecordingRunner::new().exiting("isort", 1);
    let session = session("reformat", &config, &runner, &vcs, project.path(), &["--skip-install"]);

    assert!(reformat::reformat(&session).is_err());
    assert_eq!(programs(&runner), vec!["black", "isort"]);
}

// =============================================================================
// TESTS AND TYPING
// =============================================================================

#[test]
fn test_test_session_installs_project_and_runs_pytest() {
    let project = TestProject::new();
    project.add_file("dev-requirements/constraints.txt", "alluka==0.1.2\n");
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("test", &config, &runner, &vcs, project.path(), &[]);

    testing::test(&session).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec![
            "python -m pip install --upgrade wheel",
            "python -m pip install --upgrade . -c dev-requirements/constraints.txt -r dev-requirements/tests.txt",
            "pytest -n auto --import-mode importlib",
        ]
    );
}

#[test]
fn test_test_coverage_reports_on_project() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("test-coverage", &config, &runner, &vcs, project.path(), &["--skip-install"]);

    testing::test_coverage(&session).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec!["pytest -n auto --cov=yuyo --cov-report html:coverage_html --cov-report xml:coverage.xml"]
    );
}

#[test]
fn test_type_check_prints_version_first() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("type-check", &config, &runner, &vcs, project.path(), &["--skip-install"]);

    typing::type_check(&session).unwrap();

    assert_eq!(
        runner.command_lines(),
        vec!["python -m pyright --version", "python -m pyright"]
    );
}

#[test]
fn test_verify_types_checks_project_package() {
    let project = TestProject::new();
    let (config, runner, vcs) = (sample_config(), RecordingRunner::new(), FakeVcs::default());
    let session = session("verify-types", &config, &runner, &vcs, project.path(), &["--skip-install"]);

    typing::verify_types(&session).unwrap();

    assert_eq!(
        runner.command_lines().last().unwrap(),
        "python -m pyright --verifytypes yuyo --ignoreexternal"
    );
}
