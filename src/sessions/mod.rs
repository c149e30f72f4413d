//! Session catalog
//!
//! The fixed set of sessions piped offers. Each one assembles argument
//! vectors for an external tool and runs it; none depends on another except
//! through files left on disk (build artifacts, compiled requirements).
//!
//! - [`cleanup`] - remove temporary artifacts
//! - [`deps`] - freeze and verify dev requirement files
//! - [`docs`] - build documentation
//! - [`lint`] - flake8, slotscheck, codespell, markup checks
//! - [`publish`] - build and publish distributions
//! - [`reformat`] - run every formatter
//! - [`testing`] - pytest, with or without coverage
//! - [`typing`] - pyright checks

pub mod cleanup;
pub mod deps;
pub mod docs;
pub mod lint;
pub mod publish;
pub mod reformat;
pub mod testing;
pub mod typing;

use crate::config::Config;
use crate::core::models::{Backend, SessionOptions};
use crate::core::services::{Registration, Registry, SessionDef};
use crate::error::PipedError;
use crate::session;

use cleanup::cleanup;
use deps::{freeze_dev_deps, verify_dev_deps};
use docs::generate_docs;
use lint::{flake8, slot_check, spell_check, verify_markup};
use publish::{build, publish, test_publish};
use reformat::reformat;
use testing::{test, test_coverage};
use typing::{type_check, verify_types};

/// Every session definition, in listing order
#[must_use]
pub fn catalog() -> Vec<SessionDef> {
    let reuse = SessionOptions::default().reuse_venv(true);

    vec![
        session!(cleanup, "Cleanup any temporary files made in this project by its sessions.")
            .options(SessionOptions::default().venv_backend(Backend::None)),
        session!(freeze_dev_deps, "Upgrade the dev dependencies.")
            .named("freeze-dev-deps")
            .options(reuse.clone()),
        session!(verify_dev_deps, "Verify the dev deps by installing them.")
            .named("verify-dev-deps")
            .options(reuse.clone()),
        session!(generate_docs, "Generate docs for this project using Mkdoc.")
            .named("generate-docs")
            .options(reuse.clone()),
        session!(flake8, "Run this project's modules against the pre-defined flake8 linters.")
            .options(reuse.clone()),
        session!(slot_check, "Check this project's slotted classes for common mistakes.")
            .named("slot-check")
            .options(reuse.clone()),
        session!(spell_check, "Check this project's text-like files for common spelling mistakes.")
            .named("spell-check")
            .options(reuse.clone()),
        session!(build, "Build this project using flit.").options(reuse.clone()),
        session!(verify_markup, "Verify the syntax of the repo's markup files.")
            .named("verify-markup")
            .options(reuse.clone()),
        session!(publish, "Publish this project to pypi.").options(reuse.clone()),
        session!(test_publish, "Publish this project to test pypi.")
            .named("test-publish")
            .options(reuse.clone()),
        session!(reformat, "Reformat this project's modules to fit the standard style.")
            .options(reuse.clone()),
        session!(test, "Run this project's tests using pytest.").options(reuse.clone()),
        session!(test_coverage, "Run this project's tests while recording test coverage.")
            .named("test-coverage")
            .options(reuse.clone()),
        session!(type_check, "Statically analyse and verify this project using Pyright.")
            .named("type-check")
            .options(reuse.clone()),
        session!(verify_types, "Verify the \"type completeness\" of types exported by the library using Pyright.")
            .named("verify-types")
            .options(reuse),
    ]
}

/// Register the catalog, skipping hidden sessions
///
/// # Errors
///
/// Fails if two definitions share a name.
pub fn register_all(registry: &mut Registry, config: &Config) -> Result<Vec<Registration>, PipedError> {
    catalog()
        .into_iter()
        .map(|def| registry.filtered_session(config, def))
        .collect()
}
