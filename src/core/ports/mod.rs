//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core logic and external
//! systems (subprocesses, version control). Implementations live in the
//! `adapters` module; tests use in-memory fakes.

mod runner;
mod vcs;

pub use runner::{CommandRunner, RunOutput};
pub use vcs::VersionControl;
